//! Trace infrastructure for clidisplay.
//!
//! Recovered conditions (a template key missing from the active locale, a
//! placeholder without a value, a locale that fell back to `en-US`) never
//! fail an output call. When tracing is enabled in the configuration they are
//! reported here instead. The application decides where trace lines go by
//! installing a [`TraceSink`].
//!
//! # Usage
//!
//! ```no_run
//! use clidisplay::{TraceSink, set_trace_sink, trace_event_line};
//! use std::sync::Arc;
//!
//! struct StderrSink;
//!
//! impl TraceSink for StderrSink {
//!     fn emit(&self, message: &str) {
//!         eprintln!("{}\n", message);
//!     }
//!     fn emit_line(&self, message: &str) {
//!         eprintln!("{}", message);
//!     }
//! }
//!
//! set_trace_sink(Arc::new(StderrSink));
//! trace_event_line("translation miss: FEATURE FLAGS (fr-FR)");
//! ```

use std::sync::{Arc, RwLock};

/// Trait for sinks that receive trace output.
///
/// * `emit` - For complete blocks that should have visual separation
/// * `emit_line` - For single trace lines
pub trait TraceSink: Send + Sync {
    /// Emit a complete block with trailing blank line for visual separation.
    fn emit(&self, message: &str);
    /// Emit a single trace line.
    fn emit_line(&self, message: &str);
}

static TRACE_SINK: RwLock<Option<Arc<dyn TraceSink>>> = RwLock::new(None);

/// Set the global trace sink. Replaces any previously installed sink.
pub fn set_trace_sink(sink: Arc<dyn TraceSink>) {
    if let Ok(mut guard) = TRACE_SINK.write() {
        *guard = Some(sink);
    }
}

/// Get the current trace sink.
pub fn get_trace_sink() -> Option<Arc<dyn TraceSink>> {
    TRACE_SINK.read().ok().and_then(|guard| guard.clone())
}

/// Remove the installed trace sink.
pub fn reset_trace_sink() {
    if let Ok(mut guard) = TRACE_SINK.write() {
        *guard = None;
    }
}

/// Emit a trace block. No-op when no sink is installed.
pub fn trace_event(message: &str) {
    if let Some(sink) = get_trace_sink() {
        sink.emit(message);
    }
}

/// Emit a single trace line. No-op when no sink is installed.
pub fn trace_event_line(message: &str) {
    if let Some(sink) = get_trace_sink() {
        sink.emit_line(message);
    }
}

/// Gate for trace output owned by one [`Ui`](crate::Ui).
///
/// The sink is process-wide; whether a given router traces is decided by its
/// configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tracer {
    enabled: bool,
}

impl Tracer {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn line(&self, message: impl FnOnce() -> String) {
        if self.enabled {
            trace_event_line(&message());
        }
    }

    pub(crate) fn block(&self, message: impl FnOnce() -> String) {
        if self.enabled {
            trace_event(&message());
        }
    }
}
