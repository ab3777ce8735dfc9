//! Error conversions - SQLSTATE classification and response rendering
//!
//! SQLSTATE classification shared by the store adapters, plus the axum
//! response rendering of [`AppError`] used by every router.

#[cfg(feature = "axum")]
use super::app_error::AppError;
use super::kind::ErrorKind;

/// Message used in place of any server-side error detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

// ============================================================================
// SQLSTATE classification
// ============================================================================

/// PostgreSQL の SQLSTATE を分類する
///
/// Only integrity violations are client errors; everything else is internal.
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
pub fn classify_sqlstate(code: &str) -> ErrorKind {
    match code {
        // Class 23: Integrity Constraint Violation
        "23505" => ErrorKind::Conflict,
        "23502" | "23503" | "23514" => ErrorKind::BadRequest,
        _ => ErrorKind::InternalServerError,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.is_server_error() {
            INTERNAL_ERROR_MESSAGE
        } else {
            self.message()
        };

        let body = match self.action() {
            Some(action) => serde_json::json!({ "error": message, "action": action }),
            None => serde_json::json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sqlstate() {
        assert_eq!(classify_sqlstate("23505"), ErrorKind::Conflict);
        assert_eq!(classify_sqlstate("23503"), ErrorKind::BadRequest);
        assert_eq!(classify_sqlstate("23514"), ErrorKind::BadRequest);
        assert_eq!(classify_sqlstate("57P01"), ErrorKind::InternalServerError);
        assert_eq!(classify_sqlstate("42P01"), ErrorKind::InternalServerError);
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_response_body_shape() {
        use axum::response::IntoResponse;

        let response = AppError::conflict("identity already registered").into_response();
        assert_eq!(response.status().as_u16(), 409);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "identity already registered" }));
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_server_error_detail_is_hidden() {
        use axum::response::IntoResponse;

        let response = AppError::internal("relation usuarios does not exist").into_response();
        assert_eq!(response.status().as_u16(), 500);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }
}
