use kernel::error::app_error::{AppError, AppResult};

/// `activar` / `desactivar` path segment of the status toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Activate,
    Deactivate,
}

impl StatusAction {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw {
            "activar" => Ok(StatusAction::Activate),
            "desactivar" => Ok(StatusAction::Deactivate),
            _ => Err(AppError::bad_request("invalid action")
                .with_action("Use 'activar' or 'desactivar'")),
        }
    }

    /// Value written to the active flag
    #[inline]
    pub const fn active(&self) -> bool {
        matches!(self, StatusAction::Activate)
    }

    /// Past participle used in confirmation messages
    #[inline]
    pub const fn done(&self) -> &'static str {
        match self {
            StatusAction::Activate => "activated",
            StatusAction::Deactivate => "deactivated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(StatusAction::parse("activar").unwrap(), StatusAction::Activate);
        assert_eq!(StatusAction::parse("desactivar").unwrap(), StatusAction::Deactivate);
        assert!(StatusAction::Activate.active());
        assert!(!StatusAction::Deactivate.active());
    }

    #[test]
    fn test_unknown_action() {
        for raw in ["Activar", "borrar", ""] {
            let err = StatusAction::parse(raw).unwrap_err();
            assert_eq!(err.message(), "invalid action");
        }
    }
}
