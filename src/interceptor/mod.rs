//! Logging interceptors
//!
//! Each interceptor wraps a proceed step with log lines submitted at the
//! level its family's [`Settings`] name. Failures of the wrapped call are
//! handed back untouched, failures of the logging itself are contained.

use std::fmt::{self, Debug, Display, Write};
use std::future::Future;

use crate::config::LoggingConfig;
use crate::error::Result;
use crate::models::Settings;

/// Target of the method-call interceptor's lines
pub const CALL_TARGET: &str = "log_interceptors::call";
/// Target of the timed interceptor's lines
pub const TIMED_TARGET: &str = "log_interceptors::timed";
/// Target of the HTTP interceptor's lines
pub const HTTP_TARGET: &str = "log_interceptors::http";

/// Emit a line at a level only known at runtime
macro_rules! emit {
    (target: $target:expr, $level:expr, $($arg:tt)+) => {
        match $level {
            $crate::models::LogLevel::Trace => ::tracing::trace!(target: $target, $($arg)+),
            $crate::models::LogLevel::Debug => ::tracing::debug!(target: $target, $($arg)+),
            $crate::models::LogLevel::Info => ::tracing::info!(target: $target, $($arg)+),
            $crate::models::LogLevel::Warn => ::tracing::warn!(target: $target, $($arg)+),
            $crate::models::LogLevel::Error => ::tracing::error!(target: $target, $($arg)+),
        }
    };
}

pub mod call;
pub mod http;
pub mod selector;
pub mod timed;

pub use call::CallInterceptor;
pub use http::{HttpInterceptor, DEFAULT_BODY_LIMIT};
pub use selector::{AllCalls, Selector, TagSet};
pub use timed::TimedInterceptor;

/// Placeholder used when a value cannot be rendered
pub const UNRENDERABLE: &str = "<unrenderable>";

/// Render a value through its `Debug` impl without panicking on `fmt::Error`
pub(crate) fn render_debug<T: Debug + ?Sized>(value: &T) -> Result<String> {
    let mut out = String::new();
    write!(out, "{:?}", value)?;
    Ok(out)
}

/// Render a value through its `Display` impl without panicking on `fmt::Error`
pub(crate) fn render_display<T: Display + ?Sized>(value: &T) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", value)?;
    Ok(out)
}

/// The interceptors a host has switched on
///
/// A family whose settings say `enabled = false` is never constructed, so
/// its calls go straight through with no log output.
#[derive(Clone, Default)]
pub struct Interceptors {
    call: Option<CallInterceptor>,
    timed: Option<TimedInterceptor>,
    http: Option<HttpInterceptor>,
}

impl Interceptors {
    /// Build the enabled interceptors from both settings families
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut interceptors = Self::new(config.method, config.http);
        interceptors.http = interceptors
            .http
            .map(|http| http.with_body_limit(config.http_body_limit));
        interceptors
    }

    pub fn new(method: Settings, http: Settings) -> Self {
        let (call, timed) = if method.enabled() {
            (
                Some(CallInterceptor::new(method)),
                Some(TimedInterceptor::new(method)),
            )
        } else {
            (None, None)
        };

        Self {
            call,
            timed,
            http: http.enabled().then(|| HttpInterceptor::new(http)),
        }
    }

    pub fn call_interceptor(&self) -> Option<&CallInterceptor> {
        self.call.as_ref()
    }

    pub fn timed_interceptor(&self) -> Option<&TimedInterceptor> {
        self.timed.as_ref()
    }

    pub fn http(&self) -> Option<&HttpInterceptor> {
        self.http.as_ref()
    }

    /// Run `proceed` through the call interceptor when it is enabled
    pub fn call<T, E, F>(&self, name: &str, proceed: F) -> std::result::Result<T, E>
    where
        T: Debug,
        E: Display,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        match &self.call {
            Some(interceptor) => interceptor.intercept(name, proceed),
            None => proceed(),
        }
    }

    pub async fn call_async<T, E, Fut>(&self, name: &str, proceed: Fut) -> std::result::Result<T, E>
    where
        T: Debug,
        E: Display,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        match &self.call {
            Some(interceptor) => interceptor.intercept_async(name, proceed).await,
            None => proceed.await,
        }
    }

    /// Run `proceed` through the timed interceptor when it is enabled
    pub fn time<T, E, F>(&self, name: &str, proceed: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        match &self.timed {
            Some(interceptor) => interceptor.time(name, proceed),
            None => proceed(),
        }
    }

    pub async fn time_async<T, E, Fut>(&self, name: &str, proceed: Fut) -> std::result::Result<T, E>
    where
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        match &self.timed {
            Some(interceptor) => interceptor.time_async(name, proceed).await,
            None => proceed.await,
        }
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptors")
            .field("call", &self.call.is_some())
            .field("timed", &self.timed.is_some())
            .field("http", &self.http.is_some())
            .finish()
    }
}
