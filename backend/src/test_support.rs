//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for `cfg(test)` and the `test-support` feature.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use tempfile::TempDir;

use crate::domain::CredentialHasher;
use crate::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_migrations,
};

/// Cookie name used by the session middleware.
pub const SESSION_COOKIE: &str = "session";

/// Errors raised while provisioning a [`TestDatabase`].
#[derive(Debug, thiserror::Error)]
pub enum TestDatabaseError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[from] std::io::Error),
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Fresh, migrated SQLite database in its own temporary directory.
///
/// Dropping the fixture deletes the directory and the database with it.
///
/// # Examples
/// ```no_run
/// use taskr::test_support::TestDatabase;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let db = TestDatabase::new().await?;
/// let _conn = db.pool().get().await?;
/// # Ok(())
/// # }
/// ```
pub struct TestDatabase {
    // Field order matters: the pool closes before the directory is removed.
    pool: DbPool,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create the database file, apply migrations and open a pool.
    pub async fn new() -> Result<Self, TestDatabaseError> {
        let dir = tempfile::tempdir()?;
        let url = dir
            .path()
            .join("taskr-test.db")
            .to_string_lossy()
            .into_owned();
        run_migrations(&url).await?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(2)).await?;
        Ok(Self { pool, _dir: dir })
    }

    /// Connection pool for repositories under test.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Argon2 hasher with minimal costs so tests stay fast.
///
/// Never use outside tests.
pub fn fast_hasher() -> CredentialHasher {
    CredentialHasher::with_costs(1024, 1, 1).unwrap_or_default()
}

/// Session middleware with a throwaway key and a non-`Secure` cookie so
/// plain-HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// `Location` header of a redirect, if present.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
