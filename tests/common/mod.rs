//! Shared test helpers for clidisplay tests.
//!
//! This module provides common utilities used across test files to reduce
//! duplication and ensure consistent test behavior.

// Allow dead code since not all test files use all helpers
#![allow(dead_code)]

use clidisplay::{ColorSetting, Settings, TraceSink, Ui, reset_trace_sink};
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

// =============================================================================
// ANSI Stripping
// =============================================================================

/// Strip ANSI escape codes for content verification in tests.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // Parameters run until the final letter
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

// =============================================================================
// Channels
// =============================================================================

/// In-memory output channel that stays readable after being handed to a `Ui`.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A `Ui` plus handles on its two output channels.
pub struct TestUi {
    pub ui: Ui,
    pub out: SharedBuffer,
    pub err: SharedBuffer,
}

/// Build a `Ui` on in-memory channels with color forced on.
///
/// `locale` of `None` uses `en-US`. `input` becomes the prompt input.
pub fn test_ui(locale: Option<&str>, input: &str) -> TestUi {
    let mut settings = Settings::default().with_color(ColorSetting::Enabled);
    if let Some(locale) = locale {
        settings = settings.with_locale(locale);
    }
    test_ui_with(&settings, input)
}

/// Build a `Ui` from explicit settings on in-memory channels.
pub fn test_ui_with(settings: &Settings, input: &str) -> TestUi {
    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    let ui = Ui::new(settings)
        .with_out(out.clone())
        .with_err(err.clone())
        .with_input(Cursor::new(input.as_bytes().to_vec()));
    TestUi { ui, out, err }
}

// =============================================================================
// Test Capture Sink
// =============================================================================

/// A trace sink that captures all emitted output for verification.
///
/// # Example
///
/// ```ignore
/// let (sink, captured) = CaptureSink::new();
/// set_trace_sink(Arc::new(sink));
/// let _guard = TraceGuard;
///
/// trace_event_line("test message");
///
/// let traces = captured.lock().unwrap();
/// assert!(traces.iter().any(|l| l.contains("test message")));
/// ```
pub struct CaptureSink {
    pub captured: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    /// Create a new capture sink and return both the sink and a handle
    /// to the captured messages.
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Self {
            captured: captured.clone(),
        };
        (sink, captured)
    }
}

impl TraceSink for CaptureSink {
    fn emit(&self, message: &str) {
        self.captured.lock().unwrap().push(message.to_string());
    }

    fn emit_line(&self, message: &str) {
        self.captured.lock().unwrap().push(message.to_string());
    }
}

/// RAII guard that clears the global trace sink, even if the test panics.
pub struct TraceGuard;

impl Drop for TraceGuard {
    fn drop(&mut self) {
        reset_trace_sink();
    }
}
