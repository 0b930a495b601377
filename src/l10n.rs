//! Localized date and time formatting.
//!
//! Formats are message-catalog entries like `${b} ${d}, ${Y}` whose
//! `${x}` variables are filled from the date being rendered. Weekday
//! and month names go through the translator as their own message ids
//! (`weekday_sun`, `month_mar_abbr`, ...) so catalogs can localize them
//! independently of the pattern. A raw strftime pattern (`%Y-%m-%d`)
//! is recognized and applied directly.
//!
//! Translation is an explicit collaborator: callers hand in a
//! [`Translator`] instead of the library consulting ambient request
//! state.

use chrono::{DateTime, Datelike, TimeZone};
use regex::Regex;

/// Message catalog lookup.
pub trait Translator {
    /// Translate a message id, falling back to the given default.
    fn translate(&self, msgid: &str, default: &str) -> String;
}

/// Translator returning the English defaults unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, _msgid: &str, default: &str) -> String {
        default.to_string()
    }
}

/// Which format pattern to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFlavor {
    /// Date and time, msgid `date_format_long`.
    Long,
    /// Date only, msgid `date_format_short`.
    Short,
    /// Time only, msgid `time_format`.
    TimeOnly,
}

impl TimeFlavor {
    /// Message id of the pattern.
    pub fn msgid(self) -> &'static str {
        match self {
            TimeFlavor::Long => "date_format_long",
            TimeFlavor::Short => "date_format_short",
            TimeFlavor::TimeOnly => "time_format",
        }
    }

    /// English default pattern.
    pub fn default_pattern(self) -> &'static str {
        match self {
            TimeFlavor::Long => "${b} ${d}, ${Y} ${I}:${M} ${p}",
            TimeFlavor::Short => "${b} ${d}, ${Y}",
            TimeFlavor::TimeOnly => "${I}:${M} ${p}",
        }
    }
}

const WEEKDAY_KEYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
const WEEKDAY_ENGLISH: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const WEEKDAY_ENGLISH_ABBR: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const MONTH_KEYS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const MONTH_ENGLISH: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTH_ENGLISH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Message id for a weekday, 0 being Sunday. `weekday_sun` or
/// `weekday_sun_abbr`.
pub fn weekday_msgid(weekday: usize, abbreviated: bool) -> String {
    let key = WEEKDAY_KEYS[weekday % 7];
    if abbreviated {
        format!("weekday_{key}_abbr")
    } else {
        format!("weekday_{key}")
    }
}

/// Message id for a month, 1 being January. `month_mar` or
/// `month_mar_abbr`.
pub fn month_msgid(month: usize, abbreviated: bool) -> String {
    let key = MONTH_KEYS[(month - 1) % 12];
    if abbreviated {
        format!("month_{key}_abbr")
    } else {
        format!("month_{key}")
    }
}

/// Whether a pattern is a raw strftime format string.
pub fn is_strftime_format(pattern: &str) -> bool {
    let strftime_token = Regex::new(r"%[aAbBcdHIjmMpSUwWxXyYzZ%]").unwrap();
    strftime_token.is_match(pattern)
}

/// Render a date through a localized pattern.
///
/// An explicit `format_override` (for example a site-configured format)
/// wins over the translated pattern for the flavor.
pub fn ulocalized_time<Tz: TimeZone>(
    time: &DateTime<Tz>,
    flavor: TimeFlavor,
    format_override: Option<&str>,
    translator: &dyn Translator,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let pattern = match format_override {
        Some(pattern) => pattern.to_string(),
        None => translator.translate(flavor.msgid(), flavor.default_pattern()),
    };

    if is_strftime_format(&pattern) {
        return time.format(&pattern).to_string();
    }
    interpolate(&pattern, time, translator)
}

/// Fill `${x}` variables of a pattern from a date.
pub fn interpolate<Tz: TimeZone>(
    pattern: &str,
    time: &DateTime<Tz>,
    translator: &dyn Translator,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let variable = Regex::new(r"\$\{([a-zA-Z0-9_]+)\}").unwrap();
    let weekday = time.weekday().num_days_from_sunday() as usize;
    let month = time.month() as usize;

    variable
        .replace_all(pattern, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match name {
                "A" => translator.translate(&weekday_msgid(weekday, false), WEEKDAY_ENGLISH[weekday]),
                "a" => translator.translate(
                    &weekday_msgid(weekday, true),
                    WEEKDAY_ENGLISH_ABBR[weekday],
                ),
                "B" => translator.translate(&month_msgid(month, false), MONTH_ENGLISH[month - 1]),
                "b" => translator.translate(
                    &month_msgid(month, true),
                    MONTH_ENGLISH_ABBR[month - 1],
                ),
                "Y" | "y" | "m" | "d" | "H" | "I" | "M" | "S" | "p" | "j" => {
                    time.format(&format!("%{name}")).to_string()
                }
                // Unknown variables stay as written.
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
