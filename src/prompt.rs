//! Yes/no prompt.
//!
//! One call reads one line. An empty answer takes the default, `y`/`yes` and
//! `n`/`no` (any case) decide, anything else fails with
//! [`UiError::InvalidPromptInput`]. There is no retry loop: the caller
//! decides whether to ask again.

use std::io::{BufRead, Write};

use crate::error::{Result, UiError};
use crate::style::{StyleEngine, StyleTag};

/// Marker written after the prompt text.
pub const PROMPT_MARKER: &str = ">>";

/// Per-prompt presentation overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptOptions {
    /// Style for the `>>` marker; [`StyleTag::Highlight`] when unset.
    pub marker_style: Option<StyleTag>,
}

/// Where a prompt is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptState {
    #[default]
    AwaitingInput,
    Resolved(bool),
}

/// Map one answer line to a boolean.
pub fn parse_answer(line: &str, default: bool) -> Result<bool> {
    let answer = line.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(UiError::InvalidPromptInput(answer.to_string())),
    }
}

/// Reads a single yes/no answer from an input channel.
pub struct Prompter<'a> {
    input: &'a mut dyn BufRead,
    style: StyleEngine,
    state: PromptState,
}

impl<'a> Prompter<'a> {
    pub fn new(input: &'a mut dyn BufRead, style: StyleEngine) -> Self {
        Self {
            input,
            style,
            state: PromptState::AwaitingInput,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Write `prompt_text` and the marker to `out`, then read one answer.
    ///
    /// Fails with [`UiError::InputClosed`] when the input ends before any
    /// byte of a line arrives. A line that is not UTF-8 is invalid input.
    pub fn ask(
        &mut self,
        out: &mut dyn Write,
        prompt_text: &str,
        default: bool,
        options: &PromptOptions,
    ) -> Result<bool> {
        let marker_style = options.marker_style.unwrap_or(StyleTag::Highlight);
        write!(
            out,
            "{}{} ",
            prompt_text,
            self.style.wrap(marker_style, PROMPT_MARKER)
        )?;
        out.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(UiError::InputClosed);
        }
        let line = String::from_utf8(raw).map_err(|e| {
            let lossy = String::from_utf8_lossy(e.as_bytes());
            UiError::InvalidPromptInput(lossy.trim().to_string())
        })?;

        let answer = parse_answer(&line, default)?;
        self.state = PromptState::Resolved(answer);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, default: bool) -> (Result<bool>, String, PromptState) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut prompter = Prompter::new(&mut reader, StyleEngine::new(true));
        let result = prompter.ask(&mut out, "some-prompt", default, &PromptOptions::default());
        let state = prompter.state();
        (result, String::from_utf8(out).unwrap(), state)
    }

    #[test]
    fn test_prompt_is_written() {
        let (_, out, _) = ask("y\n", false);
        assert_eq!(out, "some-prompt\x1b[36;1m>>\x1b[0m ");
    }

    #[test]
    fn test_empty_input_takes_default() {
        assert!(ask("\n", true).0.unwrap());
        assert!(!ask("\n", false).0.unwrap());
        assert!(ask("   \n", true).0.unwrap());
    }

    #[test]
    fn test_yes_and_no_tokens() {
        for yes in ["y\n", "Y\n", "yes\n", "YES\n", "Yes"] {
            assert!(ask(yes, false).0.unwrap(), "{yes:?}");
        }
        for no in ["n\n", "N\n", "no\n", "No\n"] {
            assert!(!ask(no, true).0.unwrap(), "{no:?}");
        }
    }

    #[test]
    fn test_invalid_input_fails() {
        let (result, _, state) = ask("bogus\n", false);
        assert!(matches!(result, Err(UiError::InvalidPromptInput(ref s)) if s == "bogus"));
        assert_eq!(state, PromptState::AwaitingInput);
    }

    #[test]
    fn test_non_utf8_input_is_invalid() {
        let mut reader = Cursor::new(vec![0xff, 0xfe, b'\n', b'y', b'\n']);
        let mut out = Vec::new();
        let mut prompter = Prompter::new(&mut reader, StyleEngine::new(false));
        let result = prompter.ask(&mut out, "go?", true, &PromptOptions::default());
        assert!(matches!(result, Err(UiError::InvalidPromptInput(_))), "{result:?}");
        assert_eq!(prompter.state(), PromptState::AwaitingInput);

        // The bad line is consumed; the next one is read normally
        assert!(prompter.ask(&mut out, "go?", false, &PromptOptions::default()).unwrap());
    }

    #[test]
    fn test_closed_input_fails() {
        let (result, _, state) = ask("", true);
        assert!(matches!(result, Err(UiError::InputClosed)));
        assert_eq!(state, PromptState::AwaitingInput);
    }

    #[test]
    fn test_state_resolves() {
        let (_, _, state) = ask("n\n", true);
        assert_eq!(state, PromptState::Resolved(false));
    }

    #[test]
    fn test_marker_style_override() {
        let mut reader = Cursor::new(b"y\n".to_vec());
        let mut out = Vec::new();
        let mut prompter = Prompter::new(&mut reader, StyleEngine::new(true));
        let options = PromptOptions {
            marker_style: Some(StyleTag::Failure),
        };
        prompter.ask(&mut out, "go?", false, &options).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "go?\x1b[31;1m>>\x1b[0m ");
    }

    #[test]
    fn test_plain_prompt() {
        let mut reader = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        let mut prompter = Prompter::new(&mut reader, StyleEngine::new(false));
        prompter
            .ask(&mut out, "go?", true, &PromptOptions::default())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "go?>> ");
    }

    #[test]
    fn test_reads_only_one_line() {
        let mut reader = Cursor::new(b"y\nn\n".to_vec());
        let mut out = Vec::new();
        {
            let mut prompter = Prompter::new(&mut reader, StyleEngine::new(false));
            assert!(prompter.ask(&mut out, "", false, &PromptOptions::default()).unwrap());
        }
        let mut prompter = Prompter::new(&mut reader, StyleEngine::new(false));
        assert!(!prompter.ask(&mut out, "", true, &PromptOptions::default()).unwrap());
    }
}
