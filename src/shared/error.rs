//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Two levels exist:
//! - [`RequestError`]: a problem with what the caller sent (missing or mistyped
//!   fields, references to entities that do not exist). These are values that get
//!   collected into a list and returned together.
//! - [`AppError`]: the transport-facing error, mapped onto an HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::validation::ParamType;

/// A single caller-facing problem with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// A required field is absent.
    MissingParameter { field: String },

    /// A field is present but has the wrong primitive type.
    InvalidParameterType { field: String, expected: ParamType },

    /// A field is well-typed but semantically invalid.
    InvalidParameter { field: String, reason: String },

    /// The named category does not exist.
    InvalidCategory,
}

impl RequestError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingParameter { field: field.into() }
    }

    pub fn invalid_type(field: impl Into<String>, expected: ParamType) -> Self {
        Self::InvalidParameterType {
            field: field.into(),
            expected,
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The parameter this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingParameter { field }
            | Self::InvalidParameterType { field, .. }
            | Self::InvalidParameter { field, .. } => Some(field),
            Self::InvalidCategory => None,
        }
    }

    /// Convert into the wire representation.
    pub fn to_detail(&self) -> ErrorDetail {
        let (code, message) = match self {
            Self::MissingParameter { field } => {
                ("missing_parameter", format!("Missing parameter: {}", field))
            }
            Self::InvalidParameterType { field, expected } => (
                "invalid_parameter_type",
                format!("Parameter '{}' must be of type {}", field, expected),
            ),
            Self::InvalidParameter { reason, .. } => ("invalid_parameter", reason.clone()),
            Self::InvalidCategory => ("invalid_category", "Category does not exist".to_string()),
        };

        ErrorDetail {
            code,
            message,
            parameter: self.field().map(str::to_string),
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = self.to_detail();
        match detail.parameter {
            Some(parameter) => write!(f, "{} ({})", detail.message, parameter),
            None => write!(f, "{}", detail.message),
        }
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request rejected with {} error(s)", .0.len())]
    Rejected(Vec<RequestError>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
}

/// One entry of the `errors` list in an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ErrorDetail {
    fn simple(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            parameter: None,
        }
    }

    /// The detail sent for every unauthenticated write.
    pub fn request_not_authorized() -> Self {
        Self::simple("request_not_authorized", "Request not authorized")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                msg.clone(),
                vec![ErrorDetail::simple("not_found", msg)],
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                vec![ErrorDetail::simple("bad_request", msg)],
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                msg,
                vec![ErrorDetail::request_not_authorized()],
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                msg.clone(),
                vec![ErrorDetail::simple("conflict", msg)],
            ),
            AppError::Rejected(errors) => (
                StatusCode::BAD_REQUEST,
                "Invalid request".to_string(),
                errors.iter().map(RequestError::to_detail).collect(),
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                vec![ErrorDetail::simple("validation_error", msg)],
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_error()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                internal_error()
            }
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, String, Vec<ErrorDetail>) {
    let message = "Internal server error".to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        message.clone(),
        vec![ErrorDetail::simple("internal_error", message)],
    )
}
