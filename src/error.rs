use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::messages;
use crate::submission::form::SubmitError;
use crate::submission::spam::SpamReason;
use crate::submission::validation::ValidationResult;
use crate::transport::TransportError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Validation(ValidationResult),
    Spam(SpamReason),
    Conflict(String),
    RateLimited(u64),
    Transport(TransportError),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Validation(errors) => {
                write!(f, "Validation failed: {} field(s)", errors.len())
            }
            AppError::Spam(reason) => write!(f, "Spam: {reason}"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::RateLimited(secs) => write!(f, "Rate Limited: retry after {secs}s"),
            AppError::Transport(err) => write!(f, "Transport Error: {err}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": msg }))).into_response()
            }
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                axum::Json(json!({ "error": messages::VALIDATION, "fields": errors })),
            )
                .into_response(),
            // Same body for every reason so the heuristics stay opaque.
            AppError::Spam(_) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({ "error": messages::SPAM })),
            )
                .into_response(),
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, axum::Json(json!({ "error": msg }))).into_response()
            }
            AppError::RateLimited(secs) => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, secs.to_string())],
                axum::Json(json!({ "error": format!("Too many messages. Retry after {secs}s") })),
            )
                .into_response(),
            AppError::Transport(err) => {
                tracing::error!("Relay error: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    axum::Json(json!({ "error": messages::SERVER_ERROR })),
                )
                    .into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": messages::SERVER_ERROR })),
                )
                    .into_response()
            }
        }
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => AppError::Validation(errors),
            SubmitError::Spam(reason) => AppError::Spam(reason),
            SubmitError::Transport(e) => AppError::Transport(e),
            SubmitError::AlreadySubmitted => {
                AppError::Conflict(messages::ALREADY_SUBMITTED.to_string())
            }
        }
    }
}
