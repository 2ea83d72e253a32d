//! Error types for terminal output.
//!
//! Translation and substitution misses are not errors: they degrade to the
//! raw key or the `<no value>` marker and are reported only through the
//! trace sink. Everything here is a failure the caller has to handle.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while writing output or reading a prompt answer.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A table row does not have the same number of cells as the first row.
    #[error("Malformed table: row {row} has {found} cells, expected {expected}.")]
    MalformedTable {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The prompt answer was neither empty nor a yes/no token.
    #[error("Invalid prompt input: '{0}'. Expected y/yes or n/no.")]
    InvalidPromptInput(String),

    /// The input channel reached end of file before a full line was read.
    #[error("Input closed before an answer was given.")]
    InputClosed,

    /// A locale bundle file could not be read or parsed.
    #[error("Failed to load locale bundle {}: {source}", path.display())]
    LocaleBundle {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing to an output channel (or reading the input channel) failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl UiError {
    /// Create a malformed table error.
    pub fn malformed_table(row: usize, expected: usize, found: usize) -> Self {
        Self::MalformedTable {
            row,
            expected,
            found,
        }
    }

    /// Create a locale bundle error.
    pub fn locale_bundle(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::LocaleBundle {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_table_message() {
        let err = UiError::malformed_table(2, 3, 1);
        assert_eq!(
            err.to_string(),
            "Malformed table: row 2 has 1 cells, expected 3."
        );
    }

    #[test]
    fn test_prompt_errors_are_distinct() {
        let invalid = UiError::InvalidPromptInput("bogus".to_string());
        let closed = UiError::InputClosed;
        assert!(invalid.to_string().contains("bogus"));
        assert!(matches!(closed, UiError::InputClosed));
        assert!(!matches!(invalid, UiError::InputClosed));
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: UiError = io_err.into();
        assert!(matches!(err, UiError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_locale_bundle_error_mentions_path() {
        let err = UiError::locale_bundle("/tmp/fr.json", "unexpected end of input");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/fr.json"));
        assert!(msg.contains("unexpected end of input"));
    }
}
