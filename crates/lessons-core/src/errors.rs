//! Application error type and its HTTP envelope.
//!
//! Every failure leaving a handler is rendered as
//!
//! ```json
//! { "statusCode": 404, "message": "Lesson with ID ... not found", "error": "Not Found" }
//! ```
//!
//! The `error` label is the canonical reason phrase of the status code, which
//! gives clients a short, stable error-kind string. `204 No Content` is also
//! modelled as an [`AppError`] so collection handlers can short-circuit on an
//! empty result; it renders without a body.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Body returned for every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    /// Signals an empty collection. Not a failure, but it ends the request early.
    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, anyhow::anyhow!("No content"))
    }

    /// Short error-kind label for the envelope, e.g. `"Conflict"`.
    pub fn label(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown Error")
    }

    fn message(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return StatusCode::NO_CONTENT.into_response();
        }

        if self.status.is_server_error() {
            tracing::error!(error = ?self.error, status = %self.status.as_u16(), "Unhandled error");
        }

        let body = Json(ErrorResponse {
            status_code: self.status.as_u16(),
            message: self.message(),
            error: self.label().to_string(),
        });

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
