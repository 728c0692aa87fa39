//! Per-call invocation record

use std::time::Instant;

/// Per-call record owned by an interceptor for the duration of one invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    short_name: String,
    started_at: Option<Instant>,
}

impl Invocation {
    /// Describe an untimed call
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            started_at: None,
        }
    }

    /// Describe a timed call, capturing the start instant now
    pub fn timed(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            started_at: Some(Instant::now()),
        }
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Whole milliseconds since the start instant, zero for untimed calls
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0)
    }
}
