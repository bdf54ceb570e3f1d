use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::form::{FieldErrors, FormError};
use crate::service::ServiceError;
use crate::view::ViewError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    InvalidForm(FieldErrors),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend rejected a write; one notification per message
    #[error("Upstream error: {}", .0.join("; "))]
    Upstream(Vec<String>),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(json!(msg))),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(json!(msg))),
            AppError::InvalidForm(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                Some(json!(errors)),
            ),
            AppError::ConfirmationRequired(prompt) => (
                StatusCode::PRECONDITION_REQUIRED,
                "Confirmation Required",
                Some(json!(prompt)),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", Some(json!(msg))),
            AppError::Upstream(notices) => {
                (StatusCode::BAD_GATEWAY, "Upstream Error", Some(json!(notices)))
            }
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                Some(json!(msg)),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
            AppError::Json(err) => {
                (StatusCode::BAD_REQUEST, "Invalid JSON", Some(json!(err.to_string())))
            }
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            message: message.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application
pub type AppResult<T> = Result<T, AppError>;

/// Helper trait for converting Option to AppError::NotFound
pub trait OptionExt<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(msg.into()))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Upstream(err.notices())
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Invalid(errors) => AppError::InvalidForm(errors),
            FormError::Service(e) => e.into(),
            FormError::UnknownField(_) | FormError::ViewUnsupported(_) => {
                AppError::BadRequest(err.to_string())
            }
            other => AppError::Conflict(other.to_string()),
        }
    }
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::NotListed(id) => AppError::NotFound(format!("Record {} not found", id)),
            ViewError::AlreadyDecided(msg) => AppError::Conflict(msg),
            ViewError::NothingToConfirm => AppError::BadRequest(err.to_string()),
            ViewError::Service(e) => e.into(),
        }
    }
}

/// Helper to convert anyhow errors to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
