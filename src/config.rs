//! Configuration consumed by the output layer.
//!
//! The surrounding CLI owns configuration persistence. This module only
//! describes what the presentation layer needs from it: whether to color,
//! which locale to translate into, and whether to trace recovered misses.

use std::str::FromStr;

use colored::control::ShouldColorize;

/// Environment variable forcing color on or off (`true`, `false`, `auto`).
pub const COLOR_ENV: &str = "CLI_COLOR";
/// Environment variable selecting the locale, checked before `LC_ALL`/`LANG`.
pub const LOCALE_ENV: &str = "CLI_LOCALE";
/// Environment variable enabling trace output.
pub const TRACE_ENV: &str = "CLI_TRACE";

/// Color preference as configured by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorSetting {
    /// Decide from the environment (`NO_COLOR`, `CLICOLOR`, TTY detection).
    #[default]
    Auto,
    Enabled,
    Disabled,
}

impl ColorSetting {
    /// Resolve the setting into a concrete on/off decision.
    pub fn is_enabled(self) -> bool {
        match self {
            Self::Enabled => true,
            Self::Disabled => false,
            Self::Auto => ShouldColorize::from_env().should_colorize(),
        }
    }
}

impl FromStr for ColorSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "true" | "1" | "on" | "yes" => Ok(Self::Enabled),
            "false" | "0" | "off" | "no" => Ok(Self::Disabled),
            other => Err(format!("invalid color setting '{other}'")),
        }
    }
}

/// Configuration capability required by [`Ui`](crate::Ui).
pub trait UiConfig {
    /// Color preference.
    fn color(&self) -> ColorSetting;
    /// Active locale identifier, if any (for example `fr-FR` or `fr_FR.UTF-8`).
    fn locale(&self) -> Option<&str>;
    /// Whether recovered misses are reported to the trace sink.
    fn is_trace_enabled(&self) -> bool;
}

/// Plain configuration values, usually read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub color: ColorSetting,
    pub locale: Option<String>,
    pub trace: bool,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// An unparseable color value falls back to [`ColorSetting::Auto`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let color = lookup(COLOR_ENV)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let locale = [LOCALE_ENV, "LC_ALL", "LANG"]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty() && v != "C" && v != "POSIX");

        let trace = lookup(TRACE_ENV).is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "on" | "yes"
            )
        });

        Self {
            color,
            locale,
            trace,
        }
    }

    /// Builder-style color override.
    #[must_use]
    pub fn with_color(mut self, color: ColorSetting) -> Self {
        self.color = color;
        self
    }

    /// Builder-style locale override.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Builder-style trace override.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

impl UiConfig for Settings {
    fn color(&self) -> ColorSetting {
        self.color
    }

    fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn is_trace_enabled(&self) -> bool {
        self.trace
    }
}
