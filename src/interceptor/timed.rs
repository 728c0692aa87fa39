//! Wall-clock timing of tagged calls

use std::future::Future;
use std::sync::Arc;

use super::{AllCalls, Selector, TIMED_TARGET};
use crate::models::{Invocation, Settings};

/// Measures how long tagged calls take and logs the duration in milliseconds
#[derive(Clone)]
pub struct TimedInterceptor {
    settings: Settings,
    selector: Arc<dyn Selector>,
}

impl TimedInterceptor {
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

    /// Time a synchronous call
    pub fn time<T, E, F>(&self, name: &str, proceed: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if !self.selector.is_tagged(name) {
            return proceed();
        }

        let invocation = self.start(name);
        let outcome = proceed();
        self.finish(&invocation, outcome.is_ok());
        outcome
    }

    /// Time an asynchronous call, including the time spent suspended
    pub async fn time_async<T, E, Fut>(&self, name: &str, proceed: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.selector.is_tagged(name) {
            return proceed.await;
        }

        let invocation = self.start(name);
        let outcome = proceed.await;
        self.finish(&invocation, outcome.is_ok());
        outcome
    }

    fn start(&self, name: &str) -> Invocation {
        let invocation = Invocation::timed(name);
        emit!(
            target: TIMED_TARGET,
            self.settings.log_level(),
            "Calling method: {}",
            invocation.short_name()
        );
        invocation
    }

    fn finish(&self, invocation: &Invocation, succeeded: bool) {
        let elapsed = invocation.elapsed_ms();
        if succeeded {
            emit!(
                target: TIMED_TARGET,
                self.settings.log_level(),
                "Method {} completed in {} ms",
                invocation.short_name(),
                elapsed
            );
        } else {
            emit!(
                target: TIMED_TARGET,
                self.settings.log_level(),
                "Method threw exception, elapsed time: {} ms",
                elapsed
            );
        }
    }
}
