//! Account use-cases: sign-up and login.
//!
//! [`AccountService`] implements both [`LoginService`] and
//! [`RegistrationService`] on top of any [`UserRepository`]. Argon2 work runs
//! on the blocking pool so slow hashes never stall the async workers.
//!
//! A login for an unknown name still verifies the candidate against a
//! placeholder hash, so response time does not reveal which names exist.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, RegistrationService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CredentialHasher, Error, LoginCredentials, NewUser, PasswordHash, PasswordHashError,
    Registration, User,
};

/// Message shown for any failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";
/// Message shown when a name or email is already registered.
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "That username and/or email already exists.";

const PLACEHOLDER_PASSWORD: &str = "taskr-placeholder-credential";

/// Map user repository failures to domain errors.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate => Error::conflict(DUPLICATE_ACCOUNT_MESSAGE),
    }
}

/// Login and registration over a user repository.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
    // Hashed with `hasher` on first use; shared by clones.
    placeholder: Arc<OnceLock<PasswordHash>>,
}

impl AccountService {
    /// Create a service from a repository and password hasher.
    pub fn new(users: Arc<dyn UserRepository>, hasher: CredentialHasher) -> Self {
        Self {
            users,
            hasher,
            placeholder: Arc::new(OnceLock::new()),
        }
    }

    async fn verify_password(&self, candidate: &str, user: &User) -> Result<bool, Error> {
        let hasher = self.hasher.clone();
        let candidate = Zeroizing::new(candidate.to_owned());
        let stored = user.password().clone();
        tokio::task::spawn_blocking(move || hasher.verify(candidate.as_str(), &stored))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
    }

    /// Burn one verification against the placeholder hash.
    async fn verify_placeholder(&self, candidate: &str) -> Result<(), Error> {
        let hasher = self.hasher.clone();
        let placeholder = Arc::clone(&self.placeholder);
        let candidate = Zeroizing::new(candidate.to_owned());
        tokio::task::spawn_blocking(move || -> Result<(), PasswordHashError> {
            let stored = match placeholder.get() {
                Some(stored) => stored,
                None => {
                    let fresh = hasher.hash(PLACEHOLDER_PASSWORD)?;
                    placeholder.get_or_init(|| fresh)
                }
            };
            let _matched = hasher.verify(candidate.as_str(), stored);
            Ok(())
        })
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = self.hasher.clone();
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .users
            .find_by_name(credentials.username())
            .await
            .map_err(map_user_persistence_error)?;

        let Some(user) = found else {
            self.verify_placeholder(credentials.password()).await?;
            info!("login rejected: unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        if !self.verify_password(credentials.password(), &user).await? {
            info!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        info!(user_id = %user.id(), "login accepted");
        Ok(user)
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let taken = self
            .users
            .exists_with_name_or_email(registration.name(), registration.email())
            .await
            .map_err(map_user_persistence_error)?;
        if taken {
            return Err(Error::conflict(DUPLICATE_ACCOUNT_MESSAGE));
        }

        let password = self.hash_password(registration.password()).await?;
        let new_user = NewUser {
            name: registration.name().clone(),
            email: registration.email().clone(),
            password,
        };

        // The pre-check races with concurrent sign-ups; the unique index is
        // what actually decides, surfacing as `Duplicate`.
        let user = self
            .users
            .create(&new_user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }
}
