//! Error codes shared by services and HTTP handlers.
//!
//! DESIGN
//! ======
//! Every service error implements [`ErrorCode`] so handlers can render a
//! uniform `{ code, message, retryable }` body without matching on each
//! service's variants. Codes are grepable `E_*` strings.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Grepable error code, retryable flag, and HTTP status for structured errors.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }

    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Error body returned by every JSON endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl<E: ErrorCode> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self { status: err.status(), code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
