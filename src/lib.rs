//! Terminal presentation layer for command-line clients.
//!
//! clidisplay turns what a command wants to say into what the user sees. It
//! handles:
//!
//! - Translated message templates with `{{.Name}}` placeholders
//! - ANSI styling that can be switched off as a whole
//! - Aligned and wrapped tables
//! - Streamed application log records with per-line headers
//! - A yes/no prompt on an input channel
//!
//! Everything is reached through [`Ui`], which writes primary output and
//! diagnostics to two separate channels. The building blocks are public too,
//! for callers that only need one of them.
//!
//! # Modules
//!
//! - [`config`] - Color, locale and trace settings, usually from the environment
//! - [`error`] - [`UiError`] and the crate [`Result`]
//! - [`mod@format`] - Timestamp and width helpers
//! - [`i18n`] - Locales and the [`Translator`]
//! - [`log_record`] - Log records and their renderer
//! - [`logging`] - Trace sink for diagnosing the presentation layer itself
//! - [`prompt`] - Yes/no prompt
//! - [`style`] - Style tags and the [`StyleEngine`]
//! - [`table`] - Column layout
//! - [`template`] - Placeholder substitution
//! - [`ui`] - The [`Ui`] output router

pub mod config;
pub mod error;
pub mod format;
pub mod i18n;
pub mod log_record;
pub mod logging;
pub mod prompt;
pub mod style;
pub mod table;
pub mod template;
pub mod ui;

// Re-export commonly used types
pub use config::{ColorSetting, Settings, UiConfig};
pub use error::{Result, UiError};
pub use format::{TimezoneLocation, format_log_timestamp, format_user_friendly_date};
pub use i18n::{Locale, SUPPORTED_LOCALES, Translator};
pub use log_record::{LogKind, LogLines, LogRecord, LogRenderer, MessageLines};
pub use logging::{TraceSink, get_trace_sink, reset_trace_sink, set_trace_sink, trace_event, trace_event_line};
pub use prompt::{PromptOptions, PromptState, Prompter};
pub use serde_json::Value;
pub use style::{StyleEngine, StyleTag};
pub use table::{layout, layout_wrapped};
pub use template::{NO_VALUE, ParamMap, substitute, substitute_with};
pub use ui::{DisplayError, TranslatableError, Ui};
