//! The output router.
//!
//! [`Ui`] is what command implementations talk to. It translates templates
//! through the active locale, applies styling, lays out tables and log
//! records, and writes to two independent channels: `out` for primary
//! output and `err` for diagnostics. It also owns the input channel used by
//! the yes/no prompt.
//!
//! Every translation-bearing call resolves through the [`Translator`] before
//! styling or layout touches the text.
//!
//! Access is single-writer: every method takes `&mut self`, and callers that
//! share a `Ui` across threads serialize access themselves.

use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use chrono::{DateTime, Utc};

use crate::config::UiConfig;
use crate::error::Result;
use crate::format::{TimezoneLocation, detect_terminal_width, format_user_friendly_date};
use crate::i18n::{Locale, Translator};
use crate::log_record::{LogRecord, LogRenderer};
use crate::logging::Tracer;
use crate::prompt::{PromptOptions, Prompter};
use crate::style::{StyleEngine, StyleTag};
use crate::table::{layout, layout_wrapped};
use crate::template::{ParamMap, missing_placeholders, substitute_with};

/// Token written by [`Ui::ok`].
pub const OK_TOKEN: &str = "OK";
/// Token written by [`Ui::error`].
pub const FAILED_TOKEN: &str = "FAILED";
/// Prefix written by [`Ui::deprecation_warning`].
pub const DEPRECATION_PREFIX: &str = "Deprecation warning: ";

/// Translation function handed to a [`TranslatableError`].
pub type TranslateFn<'a> = dyn Fn(&str, &[ParamMap]) -> String + 'a;

/// An error that knows how to render itself in the active locale.
pub trait TranslatableError: std::error::Error {
    /// Produce the display message using `translate`.
    fn translate(&self, translate: &TranslateFn<'_>) -> String;
}

/// Error handed to [`Ui::error`].
#[derive(Clone, Copy)]
pub enum DisplayError<'a> {
    /// Translated through the active locale before display.
    Translatable(&'a dyn TranslatableError),
    /// Displayed with its `Display` text.
    Plain(&'a dyn std::error::Error),
}

impl<'a> DisplayError<'a> {
    pub fn translatable(err: &'a dyn TranslatableError) -> Self {
        Self::Translatable(err)
    }

    pub fn plain(err: &'a dyn std::error::Error) -> Self {
        Self::Plain(err)
    }
}

/// Output router writing to a primary and a diagnostic channel.
pub struct Ui {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    input: Box<dyn BufRead + Send>,
    translator: Translator,
    style: StyleEngine,
    timezone: TimezoneLocation,
    terminal_width: Option<usize>,
    tracer: Tracer,
}

impl Ui {
    /// Create a router on stdout, stderr and stdin.
    ///
    /// Color, locale and tracing come from `config` and are fixed for the
    /// router's lifetime. An unknown locale falls back to `en-US`.
    pub fn new(config: &dyn UiConfig) -> Self {
        let tracer = Tracer::new(config.is_trace_enabled());
        let (translator, recognized) = Translator::for_identifier(config.locale());
        if !recognized {
            tracer.line(|| {
                format!(
                    "locale '{}' is not supported, using {}",
                    config.locale().unwrap_or_default(),
                    translator.locale()
                )
            });
        }

        let color = config.color().is_enabled();
        tracer.block(|| {
            format!(
                "ui settings\n  color: {}\n  locale: {}",
                color,
                translator.locale()
            )
        });

        let stdout = io::stdout();
        let terminal_width = stdout.is_terminal().then(detect_terminal_width);

        Self {
            out: Box::new(stdout),
            err: Box::new(io::stderr()),
            input: Box::new(BufReader::new(io::stdin())),
            translator,
            style: StyleEngine::new(color),
            timezone: TimezoneLocation::Local,
            terminal_width,
            tracer,
        }
    }

    /// Replace the primary channel. The new channel is treated as not being
    /// a terminal; see [`Ui::with_terminal_width`].
    #[must_use]
    pub fn with_out(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self.terminal_width = None;
        self
    }

    /// Replace the diagnostic channel.
    #[must_use]
    pub fn with_err(mut self, err: impl Write + Send + 'static) -> Self {
        self.err = Box::new(err);
        self
    }

    /// Replace the input channel read by [`Ui::bool_prompt`].
    #[must_use]
    pub fn with_input(mut self, input: impl BufRead + Send + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Render log timestamps in `timezone` instead of the local zone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: TimezoneLocation) -> Self {
        self.timezone = timezone;
        self
    }

    /// Treat the primary channel as a terminal `width` columns wide (or not
    /// a terminal, with `None`).
    #[must_use]
    pub fn with_terminal_width(mut self, width: Option<usize>) -> Self {
        self.terminal_width = width;
        self
    }

    /// Replace the translator, e.g. one extended from a bundle file.
    #[must_use]
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    pub fn locale(&self) -> Locale {
        self.translator.locale()
    }

    pub fn timezone(&self) -> TimezoneLocation {
        self.timezone
    }

    pub fn style(&self) -> StyleEngine {
        self.style
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    fn resolve<'a>(&'a self, template: &'a str) -> &'a str {
        if self.tracer.is_enabled()
            && self.translator.locale() != Locale::EnUs
            && !self.translator.contains(template)
        {
            self.tracer.line(|| {
                format!(
                    "translation miss ({}): {:?}",
                    self.translator.locale(),
                    template
                )
            });
        }
        self.translator.resolve(template)
    }

    fn render(&self, template: &str, maps: &[ParamMap], decorate: impl Fn(&str) -> String) -> String {
        let resolved = self.resolve(template);
        if self.tracer.is_enabled() {
            let missing = missing_placeholders(resolved, maps);
            if !missing.is_empty() {
                self.tracer
                    .line(|| format!("substitution miss: {missing:?} in {resolved:?}"));
            }
        }
        substitute_with(resolved, maps, decorate)
    }

    /// Translate `template` and substitute values from the first map.
    pub fn translate_text(&self, template: &str, maps: &[ParamMap]) -> String {
        self.render(template, maps, str::to_string)
    }

    /// Write translated text followed by a newline to `out`.
    pub fn text(&mut self, template: &str, maps: &[ParamMap]) -> Result<()> {
        let text = self.translate_text(template, maps);
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Like [`Ui::text`], with every substituted value highlighted.
    pub fn text_with_emphasis(&mut self, template: &str, maps: &[ParamMap]) -> Result<()> {
        let style = self.style;
        let text = self.render(template, maps, |v| style.wrap(StyleTag::Highlight, v));
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Like [`Ui::text`], with every substituted value in bold.
    pub fn text_with_bold(&mut self, template: &str, maps: &[ParamMap]) -> Result<()> {
        let style = self.style;
        let text = self.render(template, maps, |v| style.wrap(StyleTag::Bold, v));
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Write `key: value` with both sides translated.
    pub fn pair(&mut self, key: &str, template: &str, maps: &[ParamMap]) -> Result<()> {
        let key = self.resolve(key).to_string();
        let value = self.translate_text(template, maps);
        writeln!(self.out, "{key}: {value}")?;
        Ok(())
    }

    /// Write a translated header line.
    pub fn header(&mut self, text: &str) -> Result<()> {
        let line = self.style.wrap(StyleTag::Header, self.resolve(text));
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Write a translated warning to `err`.
    pub fn warning(&mut self, template: &str, maps: &[ParamMap]) -> Result<()> {
        let text = self.translate_text(template, maps);
        writeln!(self.err, "{text}")?;
        Ok(())
    }

    /// Write each warning, translated, on its own line to `err`.
    pub fn warnings<S: AsRef<str>>(&mut self, warnings: &[S]) -> Result<()> {
        for warning in warnings {
            self.warning(warning.as_ref(), &[])?;
        }
        Ok(())
    }

    /// Write a translated warning to `err` behind a deprecation prefix.
    pub fn deprecation_warning(&mut self, template: &str, maps: &[ParamMap]) -> Result<()> {
        let prefix = self.resolve(DEPRECATION_PREFIX).to_string();
        let text = self.translate_text(template, maps);
        writeln!(self.err, "{prefix}{text}")?;
        Ok(())
    }

    /// Write the translated `OK` token in success style.
    pub fn ok(&mut self) -> Result<()> {
        let token = self.style.wrap(StyleTag::Success, self.resolve(OK_TOKEN));
        writeln!(self.out, "{token}")?;
        Ok(())
    }

    /// Write the error message to `err` and the `FAILED` token to `out`.
    pub fn error(&mut self, err: DisplayError<'_>) -> Result<()> {
        let message = match err {
            DisplayError::Translatable(e) => {
                e.translate(&|template: &str, maps: &[ParamMap]| self.translate_text(template, maps))
            }
            DisplayError::Plain(e) => e.to_string(),
        };
        writeln!(self.err, "{message}")?;

        let token = self.style.wrap(StyleTag::Failure, self.resolve(FAILED_TOKEN));
        writeln!(self.out, "{token}")?;
        Ok(())
    }

    /// Write an empty line to `out`.
    pub fn newline(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// Write `rows` as aligned columns to `out`.
    pub fn table<S: AsRef<str>>(&mut self, prefix: &str, rows: &[Vec<S>], padding: usize) -> Result<()> {
        let text = layout(prefix, rows, padding)?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write `rows` with the last column wrapped to a `width`-column line.
    pub fn wrapped_table<S: AsRef<str>>(
        &mut self,
        prefix: &str,
        rows: &[Vec<S>],
        padding: usize,
        width: usize,
    ) -> Result<()> {
        let text = layout_wrapped(prefix, rows, padding, width)?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write a key/value table, wrapping the value column to the terminal.
    ///
    /// Falls back to [`Ui::table`] when `out` is not a terminal or the table
    /// has fewer than two columns.
    pub fn key_value_table<S: AsRef<str>>(
        &mut self,
        prefix: &str,
        rows: &[Vec<S>],
        padding: usize,
    ) -> Result<()> {
        let columns = rows.first().map_or(0, Vec::len);
        match self.terminal_width {
            Some(width) if columns >= 2 => self.wrapped_table(prefix, rows, padding, width),
            Some(_) => {
                self.tracer.line(|| {
                    format!("key/value table not wrapped: {columns} column(s), need at least 2")
                });
                self.table(prefix, rows, padding)
            }
            None => {
                self.tracer
                    .line(|| "key/value table not wrapped: no terminal width".to_string());
                self.table(prefix, rows, padding)
            }
        }
    }

    /// Write every display line of `record` to `out`, whatever its kind.
    pub fn log_message(&mut self, record: &LogRecord, with_header: bool) -> Result<()> {
        let renderer = LogRenderer::new(self.timezone, self.style);
        for line in renderer.render(record, with_header) {
            self.out.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    /// Ask a yes/no question; see [`Prompter::ask`].
    ///
    /// `prompt` is translated and its placeholders filled from `maps` like
    /// any other template.
    pub fn bool_prompt(
        &mut self,
        default: bool,
        prompt: &str,
        maps: &[ParamMap],
        options: Option<PromptOptions>,
    ) -> Result<bool> {
        let text = self.translate_text(prompt, maps);
        let options = options.unwrap_or_default();
        let mut prompter = Prompter::new(&mut *self.input, self.style);
        let answer = prompter.ask(&mut *self.out, &text, default, &options);
        self.tracer
            .line(|| format!("prompt {text:?} resolved to {answer:?}"));
        answer
    }

    /// Render `ts` as a human readable date in the router's timezone.
    pub fn user_friendly_date(&self, ts: &DateTime<Utc>) -> String {
        format_user_friendly_date(ts, self.timezone)
    }
}
