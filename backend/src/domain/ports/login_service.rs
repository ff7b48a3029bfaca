//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown users and wrong passwords fail identically with
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
