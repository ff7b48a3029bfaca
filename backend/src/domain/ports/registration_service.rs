//! Driving port for account sign-up.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a user from a validated registration.
    ///
    /// Fails with [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict)
    /// when the name or email is already taken; nothing is written then.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
