//! Rendering of streamed application log records.
//!
//! A [`LogRecord`] may carry several physical lines. [`LogRenderer::render`]
//! yields one display line per physical line, each with the same
//! `timestamp [source/instance] KIND ` header when headers are requested.
//! `ERR` records color the message text only, never the header. Both kinds
//! are meant for the primary output channel.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{TimezoneLocation, format_log_timestamp};
use crate::style::{StyleEngine, StyleTag};

/// Stream a record was written to by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    #[serde(rename = "OUT", alias = "out")]
    Out,
    #[serde(rename = "ERR", alias = "err")]
    Err,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Out => "OUT",
            Self::Err => "ERR",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OUT" => Ok(Self::Out),
            "ERR" => Ok(Self::Err),
            other => Err(format!("unknown log kind '{other}'")),
        }
    }
}

/// One streamed log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub message: String,
    pub kind: LogKind,
    pub timestamp: DateTime<Utc>,
    pub application_id: String,
    pub source_type: String,
    pub source_instance: String,
}

impl LogRecord {
    /// Physical lines of the message.
    ///
    /// Trailing line terminators are dropped first, so `"msg\r\n"` is one
    /// line; each remaining line loses a trailing `\r`.
    pub fn lines(&self) -> MessageLines<'_> {
        MessageLines(self.message.trim_end_matches(['\r', '\n']).split('\n'))
    }
}

/// Physical lines of a message. See [`LogRecord::lines`].
#[derive(Debug, Clone)]
pub struct MessageLines<'a>(std::str::Split<'a, char>);

impl<'a> Iterator for MessageLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let line = self.0.next()?;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}

impl std::iter::FusedIterator for MessageLines<'_> {}

/// Formats log records for display.
#[derive(Debug, Clone, Copy)]
pub struct LogRenderer {
    timezone: TimezoneLocation,
    style: StyleEngine,
}

impl LogRenderer {
    pub fn new(timezone: TimezoneLocation, style: StyleEngine) -> Self {
        Self { timezone, style }
    }

    pub fn timezone(&self) -> TimezoneLocation {
        self.timezone
    }

    /// Header shared by every line of `record`.
    pub fn header(&self, record: &LogRecord) -> String {
        format!(
            "{} [{}/{}] {} ",
            format_log_timestamp(&record.timestamp, self.timezone),
            record.source_type,
            record.source_instance,
            record.kind
        )
    }

    /// Lazily render `record` into display lines, each ending in `\n`.
    ///
    /// The returned iterator is `Clone`; a clone taken before iteration
    /// replays the same lines.
    pub fn render<'a>(&self, record: &'a LogRecord, with_header: bool) -> LogLines<'a> {
        LogLines {
            header: with_header.then(|| self.header(record)),
            lines: record.lines(),
            error: record.kind == LogKind::Err,
            style: self.style,
        }
    }
}

/// Display lines of one record. See [`LogRenderer::render`].
#[derive(Debug, Clone)]
pub struct LogLines<'a> {
    header: Option<String>,
    lines: MessageLines<'a>,
    error: bool,
    style: StyleEngine,
}

impl Iterator for LogLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let text = self.lines.next()?;
        let text = if self.error {
            self.style.wrap(StyleTag::ErrorLine, text)
        } else {
            text.to_string()
        };

        let header = self.header.as_deref().unwrap_or("");
        Some(format!("{header}{text}\n"))
    }
}

impl std::iter::FusedIterator for LogLines<'_> {}
