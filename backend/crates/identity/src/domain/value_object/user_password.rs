//! User Password Value Object
//!
//! Domain wrapper around `platform::password`.
//! The same length policy (8..=128 code points) applies to every path that
//! accepts a new password: registration, account patch, password change.
//!
//! ## Usage
//! ```rust
//! use identity::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("secretpw".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password
    ///
    /// ## Errors
    /// `BadRequest` naming the violated bound
    pub fn new(raw: String) -> AppResult<Self> {
        Self::named("contrasena", raw)
    }

    /// Same as [`RawPassword::new`] but reports errors under `field`
    pub fn named(field: &'static str, raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::bad_request(format!("{field} must be at least {min} characters"))
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("{field} must be at most {max} characters"))
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request(format!("{field} is required"))
            }
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed password in Argon2id PHC format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    ///
    /// CPU-bound; async callers run it on a blocking thread.
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    /// Restore from a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in store"))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_character_floor() {
        assert!(RawPassword::new("secretpw".to_string()).is_ok());

        let err = RawPassword::new("secret7".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "contrasena must be at least 8 characters");
    }

    #[test]
    fn test_named_field_in_message() {
        let err = RawPassword::named("nuevaContrasena", "  ".to_string()).unwrap_err();
        assert_eq!(err.message(), "nuevaContrasena is required");
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("secretpw".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("secretpx".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_pepper_must_match() {
        let raw = RawPassword::new("secretpw".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();
        assert!(hashed.verify(&raw, Some(b"pepper")));
        assert!(!hashed.verify(&raw, None));
    }

    #[test]
    fn test_corrupt_stored_hash_is_internal() {
        let err = UserPassword::from_phc_string("plaintext?").unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("secretpw".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("secretpw"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
