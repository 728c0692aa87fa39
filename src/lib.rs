//! Log Interceptors - call, timing and HTTP exchange logging
//!
//! Cross-cutting logging wrappers for services built on `tracing`.
//!
//! ## Features
//!
//! - Before / after-returning / after-throwing lines around tagged calls
//! - Millisecond timing of tagged calls, sync or async
//! - Request and response blocks for tagged HTTP routes, bodies included
//! - Two independent settings families (method calls and HTTP), each with
//!   an enabled flag, a filter level and an emission level
//!
//! Failures of the wrapped calls are returned untouched; failures while
//! formatting a line are logged at ERROR and never reach the caller.

pub mod api;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod logging;
pub mod models;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, LoggingConfig};
pub use error::{Error, Result};
pub use interceptor::{CallInterceptor, HttpInterceptor, Interceptors, TimedInterceptor};
pub use models::{LogLevel, RawSettings, Settings};
