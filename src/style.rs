//! Semantic emphasis and ANSI styling.
//!
//! Callers tag text with a [`StyleTag`]; the [`StyleEngine`] picked at
//! construction decides whether tags become SGR escape pairs or nothing at
//! all. Every styled span is closed by a reset inside the same string, so no
//! escape state leaks into the next write.

use colored::Color;

const ESC: &str = "\x1b[";
/// Reset sequence closing every styled span.
pub const RESET: &str = "\x1b[0m";

/// Closed set of emphasis kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Bold, used for emphasized values.
    Bold,
    /// Green bold, used for `OK`.
    Success,
    /// Red bold, used for `FAILED`.
    Failure,
    /// Cyan bold, used for substituted values and the prompt marker.
    Highlight,
    /// Bold, used for section headers.
    Header,
    /// Red, used for the text of error log lines.
    ErrorLine,
}

impl StyleTag {
    /// SGR parameter string for this tag (the part between `ESC[` and `m`).
    pub fn sgr_code(self) -> String {
        match self {
            Self::Bold | Self::Header => "1".to_string(),
            Self::Success => bold_fg(Color::Green),
            Self::Failure => bold_fg(Color::Red),
            Self::Highlight => bold_fg(Color::Cyan),
            Self::ErrorLine => Color::Red.to_fg_str().to_string(),
        }
    }

    /// Full start sequence, e.g. `ESC[32;1m`.
    pub fn start_sequence(self) -> String {
        format!("{ESC}{}m", self.sgr_code())
    }
}

fn bold_fg(color: Color) -> String {
    format!("{};1", color.to_fg_str())
}

/// Strategy turning a tagged span into display text.
pub trait Stylist: Send + Sync {
    fn wrap(&self, tag: StyleTag, text: &str) -> String;
}

/// Emits SGR escape pairs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiStylist;

impl Stylist for AnsiStylist {
    fn wrap(&self, tag: StyleTag, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        format!("{}{}{}", tag.start_sequence(), text, RESET)
    }
}

/// Leaves text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainStylist;

impl Stylist for PlainStylist {
    fn wrap(&self, _tag: StyleTag, text: &str) -> String {
        text.to_string()
    }
}

static ANSI: AnsiStylist = AnsiStylist;
static PLAIN: PlainStylist = PlainStylist;

/// Styling strategy selected once from the color setting.
#[derive(Clone, Copy)]
pub struct StyleEngine {
    stylist: &'static dyn Stylist,
    enabled: bool,
}

impl StyleEngine {
    /// Select ANSI styling when `color_enabled`, plain text otherwise.
    pub fn new(color_enabled: bool) -> Self {
        if color_enabled {
            Self {
                stylist: &ANSI,
                enabled: true,
            }
        } else {
            Self {
                stylist: &PLAIN,
                enabled: false,
            }
        }
    }

    /// Whether this engine emits escape sequences.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `text` in the sequence pair for `tag`.
    pub fn wrap(&self, tag: StyleTag, text: &str) -> String {
        self.stylist.wrap(tag, text)
    }
}

impl std::fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("enabled", &self.enabled)
            .finish()
    }
}
