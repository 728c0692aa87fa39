//! Interceptor settings
//!
//! [`RawSettings`] is what the host supplies, every field optional.
//! [`Settings`] is the resolved value the interceptors read.

use serde::{Deserialize, Serialize};

use super::LogLevel;

/// Settings of one interceptor family as supplied by the host, any field may be unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSettings {
    pub enabled: Option<bool>,
    pub filter_level: Option<LogLevel>,
    pub log_level: Option<LogLevel>,
}

impl RawSettings {
    /// Substitute defaults for every unset field
    pub fn resolve(self) -> Settings {
        Settings {
            enabled: self.enabled.unwrap_or(true),
            filter_level: self.filter_level.unwrap_or(LogLevel::Info),
            log_level: self.log_level.unwrap_or(LogLevel::Info),
        }
    }
}

/// Resolved, immutable settings of one interceptor family
///
/// `filter_level` is the threshold the subscriber applies to the family's
/// target, `log_level` is the level the interceptor submits its lines at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    enabled: bool,
    filter_level: LogLevel,
    log_level: LogLevel,
}

impl Settings {
    pub fn new(enabled: bool, filter_level: LogLevel, log_level: LogLevel) -> Self {
        Self {
            enabled,
            filter_level,
            log_level,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn filter_level(&self) -> LogLevel {
        self.filter_level
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

impl Default for Settings {
    fn default() -> Self {
        RawSettings::default().resolve()
    }
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        raw.resolve()
    }
}
