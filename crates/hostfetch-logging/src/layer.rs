//! Tracing layer that forwards to the embedder's log callback

use crate::callback::LogCallbackManager;
use crate::reload::{ReloadHandle, convert_level_to_filter};
use hostfetch_core::LogLevel;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that forwards log events to the FFI callback
pub struct FfiLoggingLayer {
    manager: &'static LogCallbackManager,
}

impl FfiLoggingLayer {
    /// Create a layer bound to the global callback manager
    pub fn new() -> Self {
        Self {
            manager: LogCallbackManager::global(),
        }
    }

    pub fn with_manager(manager: &'static LogCallbackManager) -> Self {
        Self { manager }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for FfiLoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for FfiLoggingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.manager.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.manager
            .log(level, metadata.target(), &visitor.into_message());
    }

    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.manager
            .is_enabled(Self::convert_level(metadata.level()))
    }
}

/// Collects the `message` field and renders the rest as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }

    fn into_message(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

/// Initialize the logging system with the FFI layer
///
/// Installs a reloadable level filter in front of [`FfiLoggingLayer`] and
/// registers its handle with [`ReloadHandle::global`]. Calling this more than
/// once keeps the first subscriber.
pub fn init_logging() {
    use tracing_subscriber::prelude::*;

    let level = LogCallbackManager::global().level();
    let (filter, handle) = tracing_subscriber::reload::Layer::new(convert_level_to_filter(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(FfiLoggingLayer::new());

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        ReloadHandle::global().set_handle(handle);
    }
}

/// Initialize logging with a specific log level
pub fn init_logging_with_level(level: LogLevel) {
    LogCallbackManager::global().set_level(level);
    init_logging();
}
