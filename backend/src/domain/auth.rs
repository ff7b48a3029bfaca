//! Authentication and registration inputs.
//!
//! Inbound adapters hand raw form strings to these constructors so a handler
//! only ever passes validated values to a port.

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use taskr::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Michael", "python").unwrap();
/// assert_eq!(creds.username().as_ref(), "Michael");
/// assert_eq!(creds.password(), "python");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(|_| LoginValidationError::EmptyUsername)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Reasons a registration form is rejected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Name was blank once trimmed.
    #[error("Name is required")]
    EmptyName,
    /// Email was blank once trimmed.
    #[error("Email is required")]
    EmptyEmail,
    /// Password was empty.
    #[error("Password is required")]
    EmptyPassword,
    /// Password and confirmation differ.
    #[error("Passwords must match")]
    PasswordMismatch,
}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyName => Self::EmptyName,
            UserValidationError::EmptyEmail => Self::EmptyEmail,
        }
    }
}

/// Validated sign-up request.
///
/// # Examples
/// ```
/// use taskr::domain::{Registration, RegistrationValidationError};
///
/// let ok = Registration::try_from_parts("Michael", "michael@realpython.pl", "python", "python");
/// assert!(ok.is_ok());
///
/// let mismatch =
///     Registration::try_from_parts("Michael", "michael@realpython.pl", "python", "pithon");
/// assert_eq!(mismatch.unwrap_err(), RegistrationValidationError::PasswordMismatch);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate the four registration form fields.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = Username::new(name)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password != confirm {
            return Err(RegistrationValidationError::PasswordMismatch);
        }

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    pub fn name(&self) -> &Username {
        &self.name
    }

    /// Requested contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password, zeroed on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
