//! Unified error handling mapping failures to HTTP status codes.
//!
//! Client-input failures (malformed CSV, bad multipart, unparseable stored
//! timestamps) surface as 400 with the underlying message; storage and
//! internal failures surface as 500 with a generic detail, the cause
//! logged server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Check if this error represents bad client input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorDetail { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Validation("price is not a number".to_string());
        assert!(err.is_validation());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_maps_to_internal_server_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(!err.is_validation());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("row 3, field 'price': not a number".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: row 3, field 'price': not a number"
        );
    }

    #[test]
    fn error_detail_serialization() {
        let body = ErrorDetail {
            detail: "Failed to parse CSV".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["detail"], "Failed to parse CSV");
    }
}
