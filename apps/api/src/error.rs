//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler returns Result<T, ApiError>                                   │
//! │         │                                                               │
//! │         ├── ValidationError ─── 400 VALIDATION_ERROR                    │
//! │         │                       413 INPUT_TOO_LARGE (size limit)       │
//! │         ├── DbError::NotFound ── 404 NOT_FOUND                          │
//! │         └── other DbError ───── 500 DATABASE_ERROR (details logged)     │
//! │                                                                         │
//! │  Body: { "code": "INPUT_TOO_LARGE", "message": "input must be ..." }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-line problems never reach this type; they are output lines.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tender_core::ValidationError;
use tender_db::DbError;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Request parameters rejected (400)
    ValidationError,

    /// Batch body over the configured limit (413)
    InputTooLarge,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    /// HTTP status sent with this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InputTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an input-too-large error.
    pub fn input_too_large(max_bytes: usize) -> Self {
        ApiError::new(
            ErrorCode::InputTooLarge,
            format!("input must be at most {} bytes", max_bytes),
        )
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::TooLarge { max, .. } => ApiError::input_too_large(max),
            other => ApiError::validation(other.to_string()),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::QueryFailed(e) | DbError::Serialization(e) | DbError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serialization() {
        let err = ApiError::input_too_large(10);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INPUT_TOO_LARGE");
        assert_eq!(json["message"], "input must be at most 10 bytes");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InputTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(ErrorCode::DatabaseError.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_every_code_is_produced_by_a_conversion() {
        let produced = [
            ApiError::from(DbError::not_found("Transaction", "x")).code,
            ApiError::from(DbError::PoolExhausted).code,
            ApiError::from(ValidationError::TooLarge {
                field: "input".to_string(),
                max: 1,
            })
            .code,
            ApiError::validation("bad divisor").code,
        ];
        let names: Vec<_> = produced
            .iter()
            .map(|code| serde_json::to_value(code).unwrap())
            .collect();
        assert_eq!(
            names,
            ["NOT_FOUND", "DATABASE_ERROR", "INPUT_TOO_LARGE", "VALIDATION_ERROR"]
        );
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_conversion() {
        let too_large = ValidationError::TooLarge {
            field: "input".to_string(),
            max: 5,
        };
        assert_eq!(ApiError::from(too_large).code, ErrorCode::InputTooLarge);

        let out_of_range = ValidationError::OutOfRange {
            field: "random_divisor".to_string(),
            min: 0,
            max: 1,
        };
        assert_eq!(ApiError::from(out_of_range).code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_db_conversion_hides_details() {
        let err = ApiError::from(DbError::QueryFailed("syntax error near SELECT".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELECT"));

        let err = ApiError::from(DbError::not_found("Transaction", "abc"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Transaction not found: abc");
    }
}
