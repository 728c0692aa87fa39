//! Capturing subscriber for assertions on emitted lines

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use crate::config::LoggingConfig;
use crate::logging::build_filter_with;

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
}

#[derive(Clone, Default)]
pub struct Captured {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Captured {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }
}

struct CaptureLayer {
    captured: Captured,
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.captured.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
        });
    }
}

/// Capture every event on the current thread until the guard drops
pub fn capture() -> (Captured, DefaultGuard) {
    let captured = Captured::default();
    let layer = CaptureLayer {
        captured: captured.clone(),
    };
    let guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));
    (captured, guard)
}

/// Capture events behind the `EnvFilter` the host would install for `logging`
///
/// Everything outside the interceptor targets is turned off.
pub fn capture_filtered(logging: &LoggingConfig) -> (Captured, DefaultGuard) {
    let captured = Captured::default();
    let layer = CaptureLayer {
        captured: captured.clone(),
    };
    let filter = build_filter_with("off", logging).unwrap();
    let guard = tracing::subscriber::set_default(
        tracing_subscriber::registry().with(filter).with(layer),
    );
    (captured, guard)
}
