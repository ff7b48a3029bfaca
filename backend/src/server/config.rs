//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use taskr::domain::CredentialHasher;
use taskr::outbound::persistence::DbPool;

/// Everything [`create_server`](super::create_server) needs to build the app.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) hasher: CredentialHasher,
}

impl ServerConfig {
    /// Configuration with the default Argon2 costs.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        db_pool: DbPool,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool,
            hasher: CredentialHasher::default(),
        }
    }

    /// Replace the password hasher.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "tests swap in cheap Argon2 costs")
    )]
    #[must_use]
    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }
}
