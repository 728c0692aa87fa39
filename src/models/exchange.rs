//! Snapshots of an HTTP exchange
//!
//! The logging layer reads requests and responses through these types so the
//! formatting code never touches the body stream itself.

use std::collections::BTreeMap;

use axum::http::{request, response, HeaderMap, Method, StatusCode};
use bytes::Bytes;

use crate::error::{Error, Result};

/// Request body captured into memory by the buffering middleware
///
/// Stored in the request extensions so the HTTP interceptor can read the
/// payload after the handler has consumed the stream.
#[derive(Debug, Clone)]
pub struct BufferedBody(Bytes);

impl BufferedBody {
    pub fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

/// Snapshot of an incoming request taken before the handler runs
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    method: Method,
    uri: String,
    path: String,
    params: BTreeMap<String, Vec<String>>,
    headers: HeaderMap,
    body: Option<BufferedBody>,
}

impl RequestSnapshot {
    pub fn from_parts(parts: &request::Parts) -> Self {
        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if let Some(query) = parts.uri.query() {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                params
                    .entry(key.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }

        Self {
            method: parts.method.clone(),
            uri: parts.uri.to_string(),
            path: parts.uri.path().to_string(),
            params,
            headers: parts.headers.clone(),
            body: parts.extensions.get::<BufferedBody>().cloned(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &BTreeMap<String, Vec<String>> {
        &self.params
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the method carries a payload worth logging
    pub fn has_loggable_body(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT
    }

    /// Buffered body as text, failing when no buffering adapter ran
    pub fn body_text(&self) -> Result<String> {
        self.body
            .as_ref()
            .map(BufferedBody::text)
            .ok_or(Error::BodyNotBuffered)
    }
}

/// Snapshot of the response produced by a handler
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseSnapshot {
    pub fn from_parts(parts: &response::Parts) -> Self {
        Self {
            status: parts.status,
            headers: parts.headers.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
