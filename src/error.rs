use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the interception layer itself.
///
/// Failures of the wrapped calls never pass through this type: interceptors
/// hand those back to the caller exactly as they were produced.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown log level: {0}")]
    InvalidLevel(String),

    // Body capture errors
    #[error("Request body was not buffered before reaching the HTTP interceptor")]
    BodyNotBuffered,

    #[error("Failed to read body: {0}")]
    BodyRead(String),

    #[error("Body not captured: {0}")]
    BodyNotCaptured(String),

    // Formatting errors
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    // Request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for interception layer operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Error::InvalidRequest(_) | Error::BodyRead(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Error::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Error::InvalidConfig(_)
            | Error::InvalidLevel(_)
            | Error::BodyNotBuffered
            | Error::BodyNotCaptured(_)
            | Error::Format(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
