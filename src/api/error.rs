//! HTTP error responses.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::library::LibraryError;

/// JSON error body: `{ "error": "<message>" }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error returned by a JSON endpoint.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::BadRequest(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            LibraryError::BadPath(_) => Self::new(StatusCode::BAD_REQUEST, "bad path"),
            LibraryError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "not found"),
            LibraryError::Io(e) => match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    tracing::warn!(error = %e, "Library entry unreadable");
                    Self::new(StatusCode::NOT_FOUND, "not found")
                }
                _ => {
                    tracing::error!(error = %e, "Library I/O failure");
                    Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
                }
            },
            LibraryError::Task(e) => {
                tracing::error!(error = %e, "Library task failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}

/// Plain-text variant used by the image endpoint.
pub fn plain(err: LibraryError) -> (StatusCode, String) {
    let api = ApiError::from(err);
    let text = match api.status {
        StatusCode::BAD_REQUEST => api.message,
        StatusCode::NOT_FOUND => "not found".to_string(),
        _ => "internal error".to_string(),
    };
    (api.status, text)
}
