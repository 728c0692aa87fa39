//! HTTP exchange logging layer
//!
//! Wraps tagged routes: the request block is emitted before the inner
//! service is called, the response block after it returns `Ok`. When the
//! inner service fails, nothing is logged for the response and the error is
//! returned as is.
//!
//! Response bodies are only collected when their exact length is known and
//! within the interceptor's body limit. Anything else is forwarded untouched
//! and logged with a placeholder.

use std::task::{Context, Poll};

use axum::body::{Body, HttpBody};
use axum::extract::Request;
use axum::response::Response;
use futures::future::BoxFuture;
use tower::{Layer, Service};

use super::buffering::{capture_body, failed_body, Capture};
use crate::error::Error;
use crate::interceptor::HttpInterceptor;
use crate::models::{RequestSnapshot, ResponseSnapshot};

/// Layer applying an [`HttpInterceptor`] to a service
#[derive(Clone)]
pub struct HttpLoggingLayer {
    interceptor: HttpInterceptor,
}

impl HttpLoggingLayer {
    pub fn new(interceptor: HttpInterceptor) -> Self {
        Self { interceptor }
    }
}

impl<S> Layer<S> for HttpLoggingLayer {
    type Service = HttpLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HttpLoggingService {
            inner,
            interceptor: self.interceptor.clone(),
        }
    }
}

/// Service produced by [`HttpLoggingLayer`]
#[derive(Clone)]
pub struct HttpLoggingService<S> {
    inner: S,
    interceptor: HttpInterceptor,
}

impl<S> Service<Request> for HttpLoggingService<S>
where
    S: Service<Request, Response = Response>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        if !self.interceptor.is_tagged(req.uri().path()) {
            let fut = self.inner.call(req);
            return Box::pin(fut);
        }

        let (parts, body) = req.into_parts();
        let snapshot = RequestSnapshot::from_parts(&parts);
        self.interceptor.before(Some(&snapshot));

        let fut = self.inner.call(Request::from_parts(parts, body));
        let interceptor = self.interceptor.clone();

        Box::pin(async move {
            let response = fut.await?;
            Ok(log_response(&interceptor, response).await)
        })
    }
}

/// Collect the response body, emit the response block and rebuild the response
async fn log_response(interceptor: &HttpInterceptor, response: Response) -> Response {
    let (parts, body) = response.into_parts();
    let snapshot = ResponseSnapshot::from_parts(&parts);
    let limit = interceptor.body_limit();

    let body = match body.size_hint().exact() {
        Some(len) if len <= limit as u64 => body,
        Some(len) => {
            let reason = format!("{} bytes exceed the {} byte limit", len, limit);
            interceptor.after(Some(&snapshot), Err(Error::BodyNotCaptured(reason)));
            return Response::from_parts(parts, body);
        }
        None => {
            let reason = "length not known in advance".to_string();
            interceptor.after(Some(&snapshot), Err(Error::BodyNotCaptured(reason)));
            return Response::from_parts(parts, body);
        }
    };

    match capture_body(body, limit).await {
        Capture::Complete(bytes) => {
            interceptor.after(Some(&snapshot), Ok(bytes.as_ref()));
            Response::from_parts(parts, Body::from(bytes))
        }
        Capture::TooLarge(body) => {
            let reason = format!("body exceeds the {} byte limit", limit);
            interceptor.after(Some(&snapshot), Err(Error::BodyNotCaptured(reason)));
            Response::from_parts(parts, body)
        }
        Capture::Failed(e) => {
            interceptor.after(Some(&snapshot), Err(Error::BodyRead(e.to_string())));
            Response::from_parts(parts, failed_body(e))
        }
    }
}
