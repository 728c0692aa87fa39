//! Before / after-returning / after-throwing logging around a call

use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::Arc;

use tracing::error;

use super::{render_debug, render_display, AllCalls, Selector, CALL_TARGET, UNRENDERABLE};
use crate::models::{Invocation, Settings};

/// Logs entry, successful return and failure of tagged calls
#[derive(Clone)]
pub struct CallInterceptor {
    settings: Settings,
    selector: Arc<dyn Selector>,
}

impl CallInterceptor {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            selector: Arc::new(AllCalls),
        }
    }

    pub fn with_selector(mut self, selector: impl Selector + 'static) -> Self {
        self.selector = Arc::new(selector);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Wrap a synchronous call
    pub fn intercept<T, E, F>(&self, name: &str, proceed: F) -> Result<T, E>
    where
        T: Debug,
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        if !self.selector.is_tagged(name) {
            return proceed();
        }

        let invocation = Invocation::new(name);
        self.before(&invocation);
        let outcome = proceed();
        self.after(&outcome);
        outcome
    }

    /// Wrap an asynchronous call
    pub async fn intercept_async<T, E, Fut>(&self, name: &str, proceed: Fut) -> Result<T, E>
    where
        T: Debug,
        E: Display,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.selector.is_tagged(name) {
            return proceed.await;
        }

        let invocation = Invocation::new(name);
        self.before(&invocation);
        let outcome = proceed.await;
        self.after(&outcome);
        outcome
    }

    fn before(&self, invocation: &Invocation) {
        emit!(
            target: CALL_TARGET,
            self.settings.log_level(),
            "Before: method invoked - {}",
            invocation.short_name()
        );
    }

    fn after<T: Debug, E: Display>(&self, outcome: &Result<T, E>) {
        match outcome {
            Ok(value) => {
                let rendered = render_debug(value).unwrap_or_else(|e| {
                    error!(target: CALL_TARGET, "Could not render method result: {}", e);
                    UNRENDERABLE.to_string()
                });
                emit!(
                    target: CALL_TARGET,
                    self.settings.log_level(),
                    "AfterReturning: method completed successfully. Result: {}",
                    rendered
                );
            }
            Err(failure) => {
                let rendered = render_display(failure).unwrap_or_else(|e| {
                    error!(target: CALL_TARGET, "Could not render method failure: {}", e);
                    UNRENDERABLE.to_string()
                });
                error!(
                    target: CALL_TARGET,
                    "AfterThrowing: method threw exception - {}", rendered
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use crate::interceptor::TagSet;
    use crate::models::LogLevel;
    use crate::test_support::{capture, capture_filtered};
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct LookupError(&'static str);

    impl fmt::Display for LookupError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    struct Opaque;

    impl Debug for Opaque {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn debug_settings() -> Settings {
        Settings::new(true, LogLevel::Trace, LogLevel::Debug)
    }

    #[test]
    fn test_successful_call_logs_before_and_after() {
        let (captured, _guard) = capture();
        let interceptor = CallInterceptor::new(Settings::default());

        let result: Result<u32, LookupError> = interceptor.intercept("computeTotal()", || Ok(42));

        assert_eq!(result.unwrap(), 42);
        let events = captured.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "Before: method invoked - computeTotal()");
        assert_eq!(
            events[1].message,
            "AfterReturning: method completed successfully. Result: 42"
        );
        assert!(events.iter().all(|e| e.level == tracing::Level::INFO));
        assert!(events.iter().all(|e| e.target == CALL_TARGET));
    }

    #[test]
    fn test_lines_use_configured_level() {
        let (captured, _guard) = capture();
        let interceptor = CallInterceptor::new(debug_settings());

        let _: Result<&str, LookupError> = interceptor.intercept("name()", || Ok("x"));

        let events = captured.events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.level == tracing::Level::DEBUG));
        assert_eq!(
            events[1].message,
            r#"AfterReturning: method completed successfully. Result: "x""#
        );
    }

    #[test]
    fn test_failure_logs_at_error_and_is_returned_unchanged() {
        let (captured, _guard) = capture();
        let interceptor = CallInterceptor::new(debug_settings());
        let original = Arc::new(LookupError("order 7 not found"));
        let raised = Arc::clone(&original);

        let result: Result<u32, Arc<LookupError>> =
            interceptor.intercept("findOrder()", move || Err(raised));

        let failure = result.unwrap_err();
        assert!(Arc::ptr_eq(&failure, &original));

        let events = captured.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "Before: method invoked - findOrder()");
        assert_eq!(events[0].level, tracing::Level::DEBUG);
        assert_eq!(
            events[1].message,
            "AfterThrowing: method threw exception - order 7 not found"
        );
        assert_eq!(events[1].level, tracing::Level::ERROR);
    }

    #[test]
    fn test_proceeds_exactly_once() {
        let interceptor = CallInterceptor::new(Settings::default());
        let calls = AtomicUsize::new(0);

        let _: Result<(), LookupError> = interceptor.intercept("once()", || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unrenderable_result_is_contained() {
        let (captured, _guard) = capture();
        let interceptor = CallInterceptor::new(Settings::default());

        let result: Result<Opaque, LookupError> = interceptor.intercept("opaque()", || Ok(Opaque));

        assert!(result.is_ok());
        let events = captured.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].level, tracing::Level::ERROR);
        assert!(events[1].message.starts_with("Could not render method result"));
        assert_eq!(
            events[2].message,
            "AfterReturning: method completed successfully. Result: <unrenderable>"
        );
    }

    #[test]
    fn test_untagged_call_is_silent() {
        let (captured, _guard) = capture();
        let interceptor =
            CallInterceptor::new(Settings::default()).with_selector(TagSet::new(["computeTotal()"]));

        let result: Result<u32, LookupError> = interceptor.intercept("helper()", || Ok(1));

        assert_eq!(result.unwrap(), 1);
        assert!(captured.events().is_empty());
    }

    #[test]
    fn test_filter_level_drops_lines_below_threshold() {
        let settings = Settings::new(true, LogLevel::Warn, LogLevel::Info);
        let (captured, _guard) = capture_filtered(&LoggingConfig {
            method: settings,
            ..LoggingConfig::default()
        });
        let interceptor = CallInterceptor::new(settings);

        let _: Result<u32, LookupError> = interceptor.intercept("computeTotal()", || Ok(42));
        assert!(captured.events().is_empty());

        let _: Result<u32, LookupError> =
            interceptor.intercept("computeTotal()", || Err(LookupError("boom")));
        assert_eq!(
            captured.messages(),
            vec!["AfterThrowing: method threw exception - boom".to_string()]
        );
    }

    #[test]
    fn test_intercept_async() {
        let interceptor = CallInterceptor::new(Settings::default());
        let (captured, _guard) = capture();

        let result: Result<u32, LookupError> = tokio_test::block_on(
            interceptor.intercept_async("computeTotal()", async { Ok(42) }),
        );

        assert_eq!(result.unwrap(), 42);
        assert_eq!(
            captured.messages(),
            vec![
                "Before: method invoked - computeTotal()".to_string(),
                "AfterReturning: method completed successfully. Result: 42".to_string(),
            ]
        );
    }
}
