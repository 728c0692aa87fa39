use crate::error::{Error, Result};
use crate::interceptor::DEFAULT_BODY_LIMIT;
use crate::models::{LogLevel, RawSettings, Settings};
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub server: ServerConfig,
    /// Subscriber configuration
    pub log: LogConfig,
    /// Interceptor settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the API server (default: 8080)
    pub port: u16,
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level for everything outside the interceptor targets
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

/// Settings of both interceptor families, resolved independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Method-call and timing interceptors (`LOGGING_SETTINGS_*`)
    pub method: Settings,
    /// HTTP interceptor (`LOGGING_SETTINGS_HTTP_*`)
    pub http: Settings,
    /// Largest request/response body the HTTP interceptor buffers (default: 1 MiB)
    pub http_body_limit: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            method: Settings::default(),
            http: Settings::default(),
            http_body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Environment prefix of the method-call family
pub const METHOD_PREFIX: &str = "LOGGING_SETTINGS";
/// Environment prefix of the HTTP family
pub const HTTP_PREFIX: &str = "LOGGING_SETTINGS_HTTP";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                port: get_env_or("APP_PORT", "8080").parse().map_err(|_| {
                    Error::InvalidConfig("APP_PORT must be a valid port number".into())
                })?,
                host: get_env_or("APP_HOST", "0.0.0.0"),
            },
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format: get_env_or("LOG_FORMAT", "pretty"),
            },
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Get the API server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl LoggingConfig {
    /// Resolve both families from their own namespace
    pub fn from_env() -> Result<Self> {
        let body_limit_key = format!("{}_MAX_BODY_BYTES", HTTP_PREFIX);
        let http_body_limit = match get_env_opt(&body_limit_key) {
            Some((key, value)) => value.parse().map_err(|_| {
                Error::InvalidConfig(format!("{} must be a byte count, got {:?}", key, value))
            })?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Self {
            method: raw_settings_from_env(METHOD_PREFIX)?.resolve(),
            http: raw_settings_from_env(HTTP_PREFIX)?.resolve(),
            http_body_limit,
        })
    }
}

/// Read the three optional fields of one family, unset or empty means absent
pub fn raw_settings_from_env(prefix: &str) -> Result<RawSettings> {
    let enabled = get_env_opt(&format!("{}_ENABLED", prefix))
        .map(|(key, value)| {
            value.to_lowercase().parse::<bool>().map_err(|_| {
                Error::InvalidConfig(format!("{} must be true or false, got {:?}", key, value))
            })
        })
        .transpose()?;

    Ok(RawSettings {
        enabled,
        filter_level: level_from_env(&format!("{}_FILTER_LEVEL", prefix))?,
        log_level: level_from_env(&format!("{}_LOG_LEVEL", prefix))?,
    })
}

fn level_from_env(key: &str) -> Result<Option<LogLevel>> {
    get_env_opt(key)
        .map(|(key, value)| {
            value.parse::<LogLevel>().map_err(|_| {
                Error::InvalidConfig(format!(
                    "{} must be one of TRACE, DEBUG, INFO, WARN, ERROR, got {:?}",
                    key, value
                ))
            })
        })
        .transpose()
}

/// Get a non-empty environment variable together with its key
fn get_env_opt(key: &str) -> Option<(String, String)> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| (key.to_string(), v))
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
