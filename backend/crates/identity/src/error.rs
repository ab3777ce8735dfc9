//! Identity Error Types
//!
//! The subsystem's boundary taxonomy. Every failure inside registration,
//! login and the account operations is translated into exactly one of these
//! variants before it reaches a caller, and every variant maps onto the
//! unified `kernel::error::AppError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::INTERNAL_ERROR_MESSAGE, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation (identity key or login name)
    #[error("{0}")]
    Conflict(String),

    /// Unknown login name or wrong password; the two are indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Correct credentials on a deactivated account
    #[error("account inactive")]
    AccountInactive,

    /// Current password supplied to a self-service change did not verify
    #[error("current password is incorrect")]
    CurrentPasswordMismatch,

    /// Missing, malformed, forged or expired bearer token
    #[error("missing or invalid token")]
    TokenInvalid,

    /// Authenticated but the role does not allow the operation
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AuthError::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AuthError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AuthError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Conflict(_) => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::AccountInactive
            | AuthError::CurrentPasswordMismatch
            | AuthError::TokenInvalid => ErrorKind::Unauthorized,
            AuthError::Forbidden(_) => ErrorKind::Forbidden,
            AuthError::NotFound(_) => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Hashing(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Internal variants carry only the generic message.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            AppError::new(kind, INTERNAL_ERROR_MESSAGE)
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Identity store error");
            }
            AuthError::Hashing(msg) => {
                tracing::error!(message = %msg, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            AuthError::InvalidCredentials | AuthError::AccountInactive => {
                tracing::warn!(reason = %self, "Rejected login attempt");
            }
            AuthError::Forbidden(msg) => {
                tracing::warn!(reason = %msg, "Forbidden request");
            }
            _ => {
                tracing::debug!(error = %self, "Identity request rejected");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Value objects validate with `AppResult`; client errors keep their message.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            ErrorKind::Conflict => AuthError::Conflict(err.message().to_string()),
            ErrorKind::NotFound => AuthError::NotFound(err.message().to_string()),
            ErrorKind::Forbidden => AuthError::Forbidden(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::token::TokenError> for AuthError {
    fn from(err: platform::token::TokenError) -> Self {
        if err.is_rejection() {
            AuthError::TokenInvalid
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}
