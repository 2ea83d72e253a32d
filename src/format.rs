//! Pure formatting helpers shared by the renderers.
//!
//! # Categories
//!
//! ## Time
//! - [`TimezoneLocation`] - Zone used to render log timestamps
//! - [`format_log_timestamp`] - `2016-07-19T16:08:12.00-0700`
//! - [`format_user_friendly_date`] - `Tue Jul 19 16:08:12 -0700 2016`
//!
//! ## Width
//! - [`display_width`] - Terminal columns of a string, ignoring ANSI codes
//! - [`pad_to`] - Right-pad a string to a display width
//! - [`detect_terminal_width`] - Current terminal columns with a fallback

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use console::{Alignment, pad_str};

// ============================================================================
// Time
// ============================================================================

/// Timezone in which timestamps are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimezoneLocation {
    /// The system timezone, looked up per instant (DST aware).
    #[default]
    Local,
    Utc,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl TimezoneLocation {
    /// Fixed offset `hours` east of UTC (negative for west). `None` if out of range.
    pub fn from_offset_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(Self::Fixed)
    }
}

fn render_in<Tz: TimeZone>(
    ts: &DateTime<Utc>,
    tz: &Tz,
    render: impl Fn(&DateTime<Tz>) -> String,
) -> String {
    render(&ts.with_timezone(tz))
}

fn in_location(
    ts: &DateTime<Utc>,
    location: TimezoneLocation,
    render: impl Fn(DateTime<FixedOffset>) -> String,
) -> String {
    match location {
        TimezoneLocation::Local => render_in(ts, &Local, |dt| render(dt.fixed_offset())),
        TimezoneLocation::Utc => render_in(ts, &Utc, |dt| render(dt.fixed_offset())),
        TimezoneLocation::Fixed(offset) => render_in(ts, &offset, |dt| render(*dt)),
    }
}

/// Format a log timestamp as `YYYY-MM-DDThh:mm:ss.ss±hhmm`.
///
/// Fractional seconds are truncated to two digits; the offset has no colon.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use clidisplay::{TimezoneLocation, format_log_timestamp};
///
/// let ts = DateTime::from_timestamp(1468969692, 0).unwrap();
/// let pacific = TimezoneLocation::from_offset_hours(-7).unwrap();
/// assert_eq!(format_log_timestamp(&ts, pacific), "2016-07-19T16:08:12.00-0700");
/// ```
pub fn format_log_timestamp(ts: &DateTime<Utc>, location: TimezoneLocation) -> String {
    in_location(ts, location, |dt| {
        // Leap seconds report nanos past 1e9.
        let centis = (dt.timestamp_subsec_nanos() / 10_000_000).min(99);
        format!(
            "{}.{:02}{}",
            dt.format("%Y-%m-%dT%H:%M:%S"),
            centis,
            dt.format("%z")
        )
    })
}

/// Format a date for humans, e.g. `Tue Jul 19 16:08:12 -0700 2016`.
pub fn format_user_friendly_date(ts: &DateTime<Utc>, location: TimezoneLocation) -> String {
    in_location(ts, location, |dt| {
        dt.format("%a %b %d %H:%M:%S %z %Y").to_string()
    })
}

// ============================================================================
// Width
// ============================================================================

/// Terminal columns occupied by `s`; ANSI escape codes count as zero.
pub fn display_width(s: &str) -> usize {
    console::measure_text_width(s)
}

/// Right-pad `s` with spaces to `width` display columns.
///
/// Strings already at or beyond `width` are returned unchanged.
pub fn pad_to(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Width used when the terminal size cannot be detected (e.g., piped output).
pub const DEFAULT_WIDTH: usize = 120;

/// Detect the current terminal width, falling back to [`DEFAULT_WIDTH`].
pub fn detect_terminal_width() -> usize {
    let (width, _) = termimad::terminal_size();
    let width = width as usize;
    if width == 0 { DEFAULT_WIDTH } else { width }
}

// ============================================================================
// Tests
// ============================================================================
