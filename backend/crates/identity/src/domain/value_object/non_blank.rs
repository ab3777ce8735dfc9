use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-blank free text with an upper bound (names, job titles, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NonBlank(String);

impl NonBlank {
    pub fn new(field: &'static str, raw: impl Into<String>, max_len: usize) -> AppResult<Self> {
        let raw = raw.into();
        let text = raw.trim();

        if text.is_empty() {
            return Err(AppError::bad_request(format!("{field} is required")));
        }

        if text.chars().count() > max_len {
            return Err(AppError::bad_request(format!(
                "{field} must be at most {max_len} characters"
            )));
        }

        Ok(Self(text.to_string()))
    }

    /// Optional field: absent or blank input yields `None`
    pub fn optional(
        field: &'static str,
        raw: Option<String>,
        max_len: usize,
    ) -> AppResult<Option<Self>> {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::new(field, raw, max_len).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonBlank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims() {
        let text = NonBlank::new("nombre", "  Acme Ferries ", 100).unwrap();
        assert_eq!(text.as_str(), "Acme Ferries");
    }

    #[test]
    fn test_blank_and_too_long() {
        assert_eq!(
            NonBlank::new("cargo", " ", 10).unwrap_err().message(),
            "cargo is required"
        );
        assert!(NonBlank::new("cargo", "x".repeat(11), 10).is_err());
    }

    #[test]
    fn test_optional() {
        assert!(NonBlank::optional("direccion", None, 10).unwrap().is_none());
        assert!(NonBlank::optional("direccion", Some("  ".into()), 10).unwrap().is_none());
        assert!(NonBlank::optional("direccion", Some("Puerto".into()), 10).unwrap().is_some());
    }
}
