//! API error handling.
//!
//! Maps service and validation failures to JSON error bodies.
//!
//! | Error | HTTP Status | Code |
//! |-------|-------------|------|
//! | `ResourceNotFound` | 404 | `RESOURCE_NOT_FOUND` |
//! | `BusinessRuleViolation` | 409 | `E001` / `E002` |
//! | `ValidationError` | 400 | `VALIDATION_ERROR` |
//! | `Repository` | 500 | `INTERNAL_ERROR` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::application::ServiceError;
use crate::domain::ValidationError;

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", "An internal error occurred"),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(error: ServiceError) -> Self {
        match &error {
            ServiceError::ResourceNotFound { id } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "RESOURCE_NOT_FOUND",
                    error.to_string(),
                    serde_json::json!({ "id": id }),
                ),
            ),
            ServiceError::BusinessRuleViolation(rule) => Self::new(
                StatusCode::CONFLICT,
                ApiError::new(rule.code(), rule.to_string()),
            ),
            // Internal errors should not expose details to clients.
            ServiceError::Repository(repository_error) => {
                tracing::error!(error = %repository_error, "Storage failure");
                Self::internal_error()
            }
        }
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::with_details(
                "VALIDATION_ERROR",
                error.message.clone(),
                serde_json::json!({ "field": error.field }),
            ),
        )
    }
}
