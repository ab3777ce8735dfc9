//! Login Name Value Object
//!
//! ログイン名（`usuario`）。全ロールを通じて一意。
//!
//! ## 設計方針
//! - NFKC正規化 → 前後の空白除去 → 検証 の順で処理
//! - 比較は正規化後の値で完全一致（大文字・小文字は区別する）
//!
//! ## 不変条件
//! - 長さ: 4〜120文字（正規化後）
//! - 制御文字を含まない

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const LOGIN_NAME_MIN_LENGTH: usize = 4;
pub const LOGIN_NAME_MAX_LENGTH: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginName(String);

impl LoginName {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let normalized: String = raw.into().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(AppError::bad_request("usuario is required"));
        }

        let len = name.chars().count();
        if !(LOGIN_NAME_MIN_LENGTH..=LOGIN_NAME_MAX_LENGTH).contains(&len) {
            return Err(AppError::bad_request(format!(
                "usuario must be between {LOGIN_NAME_MIN_LENGTH} and {LOGIN_NAME_MAX_LENGTH} characters"
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("usuario contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_keeps_case() {
        let name = LoginName::new("  Acme1 ").unwrap();
        assert_eq!(name.as_str(), "Acme1");
    }

    #[test]
    fn test_length_bounds() {
        assert!(LoginName::new("abc").is_err());
        assert!(LoginName::new("abcd").is_ok());
        assert!(LoginName::new("a".repeat(LOGIN_NAME_MAX_LENGTH)).is_ok());
        assert!(LoginName::new("a".repeat(LOGIN_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_blank_is_required_error() {
        let err = LoginName::new("\t ").unwrap_err();
        assert_eq!(err.message(), "usuario is required");
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(LoginName::new("acme\u{0007}1").is_err());
    }

    #[test]
    fn test_nfkc_fullwidth_folds() {
        let name = LoginName::new("ａｃｍｅ1").unwrap();
        assert_eq!(name.as_str(), "acme1");
    }
}
