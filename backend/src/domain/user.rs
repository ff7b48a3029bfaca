//! User account model.

use std::fmt;

use super::password::PasswordHash;

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was missing or blank once trimmed.
    #[error("name is required")]
    EmptyName,
    /// Email was missing or blank once trimmed.
    #[error("email is required")]
    EmptyEmail,
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw row identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw row identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique, case-sensitive login name.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - The trimmed value is non-empty.
///
/// # Examples
/// ```
/// use taskr::domain::Username;
///
/// let name = Username::new("  Michael ").expect("valid name");
/// assert_eq!(name.as_ref(), "Michael");
/// assert!(Username::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique contact address. Only presence is checked, not RFC syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted user account.
///
/// ## Invariants
/// - `name` and `email` are unique across all users.
/// - `password` holds a PHC-formatted hash, never the submitted secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: Username,
    email: EmailAddress,
    password: PasswordHash,
}

impl User {
    /// Assemble a user from already validated parts.
    #[must_use]
    pub fn new(id: UserId, name: Username, email: EmailAddress, password: PasswordHash) -> Self {
        Self {
            id,
            name,
            email,
            password,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn name(&self) -> &Username {
        &self.name
    }

    /// Contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password(&self) -> &PasswordHash {
        &self.password
    }
}

/// User record awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: Username,
    pub email: EmailAddress,
    pub password: PasswordHash,
}
