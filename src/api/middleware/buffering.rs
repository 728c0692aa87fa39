//! Request body buffering
//!
//! The body stream of a request can be read once. POST and PUT bodies are
//! collected here, stored in the request extensions as [`BufferedBody`] and
//! replayed to the handler, so the HTTP logging layer can print them.
//! Bodies larger than the interceptor's body limit are handed on unbuffered.

use axum::body::{Body, HttpBody};
use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tracing::{debug, warn};

use crate::models::BufferedBody;

/// Outcome of reading a body for logging
pub(crate) enum Capture {
    /// The whole body, no larger than the limit
    Complete(Bytes),
    /// Over the limit, carries a body equivalent to the one passed in
    TooLarge(Body),
    /// The body stream failed
    Failed(axum::Error),
}

/// Read `body` into memory unless it turns out to be larger than `limit`
///
/// Chunks read before the limit was crossed are replayed in front of the
/// rest of the stream, so the reader downstream sees the original bytes.
pub(crate) async fn capture_body(body: Body, limit: usize) -> Capture {
    if body.size_hint().lower() > limit as u64 {
        return Capture::TooLarge(body);
    }

    let mut stream = body.into_data_stream();
    let mut chunks = Vec::new();
    let mut size = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => return Capture::Failed(e),
        };
        size = size.saturating_add(chunk.len());
        chunks.push(chunk);

        if size > limit {
            let replay = futures::stream::iter(chunks.into_iter().map(Ok::<_, axum::Error>));
            return Capture::TooLarge(Body::from_stream(replay.chain(stream)));
        }
    }

    let mut bytes = BytesMut::with_capacity(size);
    for chunk in chunks {
        bytes.extend_from_slice(&chunk);
    }
    Capture::Complete(bytes.freeze())
}

/// Buffer POST/PUT bodies up to `limit` bytes before they reach the logging layer
pub async fn buffer_request_body(
    State(limit): State<usize>,
    req: Request,
    next: Next,
) -> Response {
    if *req.method() != Method::POST && *req.method() != Method::PUT {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();
    let body = match capture_body(body, limit).await {
        Capture::Complete(bytes) => {
            parts.extensions.insert(BufferedBody::new(bytes.clone()));
            Body::from(bytes)
        }
        Capture::TooLarge(body) => {
            debug!(
                "Request body for {} exceeds {} bytes, not buffered",
                parts.uri.path(),
                limit
            );
            body
        }
        Capture::Failed(e) => {
            warn!("Could not buffer request body for {}: {}", parts.uri.path(), e);
            failed_body(e)
        }
    };

    next.run(Request::from_parts(parts, body)).await
}

/// A body that yields `err` to whoever reads it next
pub(crate) fn failed_body(err: axum::Error) -> Body {
    Body::from_stream(futures::stream::once(async move { Err::<Bytes, _>(err) }))
}
