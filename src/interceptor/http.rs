//! Formatting of HTTP request and response blocks
//!
//! The middleware in `api::middleware::logging` drives the exchange and hands
//! snapshots to [`HttpInterceptor::before`] and [`HttpInterceptor::after`].

use std::fmt::Write;
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};
use tracing::error;

use super::{AllCalls, Selector, HTTP_TARGET};
use crate::error::Result;
use crate::models::{RequestSnapshot, ResponseSnapshot, Settings};

/// Placeholder appended when the request body cannot be read
pub const REQUEST_BODY_UNAVAILABLE: &str = "Could not log request body";
/// Placeholder appended when the response body cannot be read
pub const RESPONSE_BODY_UNAVAILABLE: &str = "Could not log response body";

/// Largest body, in bytes, captured for the request and response blocks
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Logs request and response blocks for tagged routes
#[derive(Clone)]
pub struct HttpInterceptor {
    settings: Settings,
    selector: Arc<dyn Selector>,
    body_limit: usize,
}

impl HttpInterceptor {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            selector: Arc::new(AllCalls),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Cap the bodies buffered for logging, larger ones are passed through
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Restrict logging to request paths the selector tags
    pub fn with_selector(mut self, selector: impl Selector + 'static) -> Self {
        self.selector = Arc::new(selector);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_tagged(&self, path: &str) -> bool {
        self.selector.is_tagged(path)
    }

    /// Emit the request block, no-op without a current request
    pub fn before(&self, request: Option<&RequestSnapshot>) {
        let Some(request) = request else {
            return;
        };

        match format_request(request) {
            Ok(message) => emit!(target: HTTP_TARGET, self.settings.log_level(), "{}", message),
            Err(e) => error!(target: HTTP_TARGET, "Could not format HTTP request: {}", e),
        }
    }

    /// Emit the response block, no-op without a current response
    ///
    /// `body` is the handler's output, `Err` when it could not be collected.
    pub fn after(&self, response: Option<&ResponseSnapshot>, body: Result<&[u8]>) {
        let Some(response) = response else {
            return;
        };

        let body = match body {
            Ok(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Err(e) => {
                error!(target: HTTP_TARGET, "{}", e);
                RESPONSE_BODY_UNAVAILABLE.to_string()
            }
        };

        match format_response(response, &body) {
            Ok(message) => emit!(target: HTTP_TARGET, self.settings.log_level(), "{}", message),
            Err(e) => error!(target: HTTP_TARGET, "Could not format HTTP response: {}", e),
        }
    }
}

fn format_request(request: &RequestSnapshot) -> Result<String> {
    let mut message = String::new();
    message.push_str("\n= HTTP request =\n");
    writeln!(message, "Method: {}", request.method())?;
    writeln!(message, "Path: {}", request.path())?;

    if !request.params().is_empty() {
        writeln!(message, "Query parameters: {:?}", request.params())?;
    }

    message.push_str("Headers:\n");
    write_headers(&mut message, request.headers())?;

    if request.has_loggable_body() {
        match request.body_text() {
            Ok(body) => writeln!(message, "Request body: {}", body)?,
            Err(e) => {
                error!(target: HTTP_TARGET, "{}", e);
                writeln!(message, "{}", REQUEST_BODY_UNAVAILABLE)?;
            }
        }
    }

    Ok(message)
}

fn format_response(response: &ResponseSnapshot, body: &str) -> Result<String> {
    let mut message = String::new();
    message.push_str("\n= HTTP response =\n");
    writeln!(message, "Status: {}", response.status().as_u16())?;
    write_headers(&mut message, response.headers())?;
    writeln!(message, "Response body: {}", body)?;
    Ok(message)
}

fn write_headers(message: &mut String, headers: &HeaderMap) -> Result<()> {
    for (name, value) in headers {
        writeln!(message, "  {}: {}", name, header_text(value))?;
    }
    Ok(())
}

fn header_text(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    }
}
