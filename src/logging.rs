//! Subscriber set-up
//!
//! Each enabled interceptor family gets its own `EnvFilter` directive so its
//! `filter_level` gates the family's target independently of the default
//! level applied to the rest of the process.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use crate::interceptor::{CALL_TARGET, HTTP_TARGET, TIMED_TARGET};
use crate::models::LogLevel;

/// One `(target, threshold)` pair per enabled interceptor target
pub fn interceptor_thresholds(logging: &LoggingConfig) -> Vec<(&'static str, LogLevel)> {
    let mut thresholds = Vec::with_capacity(3);
    if logging.method.enabled() {
        thresholds.push((CALL_TARGET, logging.method.filter_level()));
        thresholds.push((TIMED_TARGET, logging.method.filter_level()));
    }
    if logging.http.enabled() {
        thresholds.push((HTTP_TARGET, logging.http.filter_level()));
    }
    thresholds
}

/// Build the filter from a default directive plus the interceptor thresholds
pub fn build_filter_with(default: &str, logging: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(default)
        .map_err(|e| Error::InvalidConfig(format!("Invalid log filter {:?}: {}", default, e)))?;

    for (target, level) in interceptor_thresholds(logging) {
        let directive: Directive = format!("{}={}", target, level.as_str().to_lowercase())
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("Invalid directive for {}: {}", target, e)))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Build the filter, letting `RUST_LOG` override `LOG_LEVEL` for the default
pub fn build_filter(config: &Config) -> Result<EnvFilter> {
    let default = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.log.level.clone());

    build_filter_with(&default, &config.logging)
}

/// Install the global subscriber
pub fn init(config: &Config) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.log.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|e| Error::Internal(format!("Failed to install subscriber: {}", e)))
}
