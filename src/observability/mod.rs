//! Observability for fieldmap
//!
//! Structured JSON-line logging of schema lifecycle events. Nothing on the
//! per-value conversion or validation path logs.
//!
//! ```ignore
//! use fieldmap::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::SchemaLoaded, &[("schema", "User")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

fn severity_of(event: Event) -> Severity {
    if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
