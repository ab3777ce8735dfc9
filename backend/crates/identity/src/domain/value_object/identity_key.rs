//! Identity Key Value Object
//!
//! 業務識別子（RIF / cédula）。ドメインエンティティの主キーであり、
//! 対応するクレデンシャルの主キーでもある。
//!
//! ## 不変条件
//! - 前後の空白は除去される
//! - 1〜20文字
//! - 英数字と `-` のみ（例: `J-001`, `V-12345678`）

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum identity key length (matches the store's column width)
pub const IDENTITY_KEY_MAX_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        Self::named("identity key", raw)
    }

    /// Validate under the caller's field name (`rif`, `cedula`, ...)
    pub fn named(field: &'static str, raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let key = raw.trim();

        if key.is_empty() {
            return Err(AppError::bad_request(format!("{field} is required")));
        }

        if key.chars().count() > IDENTITY_KEY_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "{field} must be at most {IDENTITY_KEY_MAX_LENGTH} characters"
            )));
        }

        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AppError::bad_request(format!(
                "{field} may only contain letters, digits and '-'"
            )));
        }

        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert_eq!(IdentityKey::new("J-001").unwrap().as_str(), "J-001");
        assert_eq!(IdentityKey::new("  V-12345678 ").unwrap().as_str(), "V-12345678");
    }

    #[test]
    fn test_blank_key_names_field() {
        let err = IdentityKey::named("rif", "   ").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "rif is required");
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert!(IdentityKey::new("J 001").is_err());
        assert!(IdentityKey::new("J-001/../x").is_err());
    }

    #[test]
    fn test_rejects_too_long() {
        let long = "J".repeat(IDENTITY_KEY_MAX_LENGTH + 1);
        assert!(IdentityKey::new(long).is_err());
    }
}
