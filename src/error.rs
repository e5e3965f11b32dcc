//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::page::InvalidSort;
use crate::domain::{EventId, FieldError, ValidationErrors};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid event submission: basePrice: BasePrice is Wrong.",
///     "details": null
///   },
///   "errors": [
///     {
///       "objectName": "eventSubmission",
///       "field": "basePrice",
///       "code": "wrongValue",
///       "defaultMessage": "BasePrice is Wrong.",
///       "rejectedValue": 10000
///     }
///   ]
/// }
/// ```
/// `errors` is only present for validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
    /// Individual field and object errors, in the order they were found.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the table on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The submission parsed but broke one or more rules.
    #[error("invalid event submission: {0}")]
    Validation(ValidationErrors),

    /// The request body is not a JSON event submission.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A query parameter could not be interpreted.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Event with the given id was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::MalformedBody(_) => 1002,
            Self::InvalidQuery(_) => 1003,
            Self::EventNotFound(_) => 2001,
            Self::Persistence(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) | Self::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<InvalidSort> for ApiError {
    fn from(err: InvalidSort) -> Self {
        Self::InvalidQuery(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let error = ErrorBody {
            code: self.error_code(),
            message: self.to_string(),
            details: None,
        };
        let errors = match self {
            Self::Validation(list) => list.into_vec(),
            _ => Vec::new(),
        };
        let mut response = axum::Json(ErrorResponse { error, errors }).into_response();
        *response.status_mut() = status;
        response
    }
}
