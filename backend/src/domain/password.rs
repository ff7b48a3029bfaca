//! Password storage primitives.
//!
//! Submitted passwords are never persisted. [`CredentialHasher`] turns them
//! into Argon2id PHC strings and checks candidates against a stored
//! [`PasswordHash`]. Verification reads the cost parameters from the stored
//! string, so hashes created under older settings keep working.

use std::fmt;

use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use tracing::warn;

/// Errors raised while configuring or running the hasher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Argon2 rejected the requested cost parameters.
    #[error("invalid password hashing parameters: {message}")]
    Params { message: String },
    /// Hashing the password failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

/// PHC-formatted password hash as stored in the `users.password` column.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string loaded from the store.
    #[must_use]
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Argon2id hasher with configurable cost.
///
/// # Examples
/// ```
/// use taskr::domain::CredentialHasher;
///
/// let hasher = CredentialHasher::with_costs(1024, 1, 1).expect("valid costs");
/// let hash = hasher.hash("python").expect("hash");
/// assert!(hasher.verify("python", &hash));
/// assert!(!hasher.verify("foo", &hash));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Build a hasher from explicit Argon2 parameters.
    #[must_use]
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Build a hasher from memory (KiB), iteration and lane counts.
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|err| {
            PasswordHashError::Params {
                message: err.to_string(),
            }
        })?;
        Ok(Self::new(params))
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })?;
        Ok(PasswordHash(phc.to_string()))
    }

    /// Check `candidate` against a stored hash.
    ///
    /// Malformed stored hashes never verify.
    #[must_use]
    pub fn verify(&self, candidate: &str, stored: &PasswordHash) -> bool {
        let parsed = match PhcString::new(stored.as_str()) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "stored password hash is not a valid PHC string");
                return false;
            }
        };
        self.argon2()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}
