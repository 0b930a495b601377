//! Coercion, formatting, and id helpers.
//!
//! The coercion helpers here never fail: bad input yields a caller
//! supplied default (or is passed through), because they run in
//! template code where raising would take the whole page down.

pub mod idcheck;

pub use idcheck::{check_id, CatalogInfo, IdCheckContext, RESERVED_IDS};

use serde_json::Value;
use tracing::warn;

use crate::content::TypeRegistry;
use crate::settings::registry::SettingsRegistry;
use crate::settings::search::SearchSettings;

/// Convert a loosely-typed value to an integer, falling back to the
/// default instead of erroring.
///
/// Numbers truncate, numeric strings parse, booleans count as 0/1,
/// everything else yields the default.
pub fn safe_int(value: &Value, default: i64) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Value::String(text) => text.trim().parse().unwrap_or(default),
        Value::Bool(flag) => i64::from(*flag),
        _ => default,
    }
}

/// Text encodings understood by [`safe_text`] and [`safe_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

/// Decode bytes with the given encoding, falling back to a lossy UTF-8
/// decode instead of erroring.
pub fn safe_text(value: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => match std::str::from_utf8(value) {
            Ok(text) => text.to_string(),
            Err(_) => String::from_utf8_lossy(value).into_owned(),
        },
        // ASCII input is valid UTF-8; anything else takes the same
        // lossy fallback an invalid UTF-8 sequence would.
        TextEncoding::Ascii => String::from_utf8_lossy(value).into_owned(),
        TextEncoding::Latin1 => value.iter().map(|&b| b as char).collect(),
    }
}

/// Encode text as bytes of the given encoding. Characters outside the
/// target charset become `?`.
pub fn safe_bytes(value: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => value.as_bytes().to_vec(),
        TextEncoding::Ascii => value
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect(),
        TextEncoding::Latin1 => value
            .chars()
            .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
            .collect(),
    }
}

/// Input accepted by [`human_readable_size`].
#[derive(Debug, Clone, PartialEq)]
pub enum SizeInput {
    Int(i64),
    Float(f64),
    Text(String),
    None,
}

impl From<i64> for SizeInput {
    fn from(value: i64) -> Self {
        SizeInput::Int(value)
    }
}

impl From<u64> for SizeInput {
    fn from(value: u64) -> Self {
        SizeInput::Int(value as i64)
    }
}

impl From<f64> for SizeInput {
    fn from(value: f64) -> Self {
        SizeInput::Float(value)
    }
}

impl From<&str> for SizeInput {
    fn from(value: &str) -> Self {
        SizeInput::Text(value.to_string())
    }
}

const SIZE_ORDER: [(&str, u64); 5] = [
    ("PB", 1 << 50),
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
];

/// Get a human readable size string.
///
/// Zero and empty input render as `0 KB`, anything below one KB as
/// `1 KB`, everything else with one decimal in the largest unit it
/// reaches. Non-numeric text comes back unchanged.
pub fn human_readable_size(size: impl Into<SizeInput>) -> String {
    let smallest = SIZE_ORDER[SIZE_ORDER.len() - 1].0;

    let size = match size.into() {
        SizeInput::Int(value) => value,
        SizeInput::Float(value) => {
            if value.is_finite() {
                value as i64
            } else {
                // NaN and infinities are not sizes; echo them back.
                return value.to_string();
            }
        }
        SizeInput::Text(text) => match text.trim().parse::<i64>() {
            Ok(value) => value,
            Err(_) if text.is_empty() => return format!("0 {smallest}"),
            Err(_) => return text,
        },
        SizeInput::None => return format!("0 {smallest}"),
    };

    if size == 0 {
        return format!("0 {smallest}");
    }
    if size < SIZE_ORDER[SIZE_ORDER.len() - 1].1 as i64 {
        return format!("1 {smallest}");
    }

    let size = size as u64;
    for (unit, factor) in SIZE_ORDER {
        if size / factor > 0 {
            return format!("{:.1} {unit}", size as f64 / factor as f64);
        }
    }
    // Unreachable: size >= 1 KB always matches a unit.
    format!("1 {smallest}")
}

/// Crop text for listings, cutting at a word boundary where possible
/// and appending the ellipsis.
pub fn crop_text(text: &str, max_chars: usize, ellipsis: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cropped: String = text.chars().take(max_chars).collect();
    if let Some(space) = cropped.rfind(char::is_whitespace) {
        cropped.truncate(space);
    }
    let mut cropped = cropped.trim_end().to_string();
    cropped.push_str(ellipsis);
    cropped
}

/// Derive a legal short name from a title: lowercased, whitespace and
/// illegal characters folded to single dashes.
pub fn normalize_id(title: &str) -> String {
    let mut id = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.push(c.to_ascii_lowercase());
        } else if matches!(c, '_' | '.' | '-') {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.push(c);
        } else {
            pending_dash = true;
        }
    }
    id.trim_matches(|c| c == '-' || c == '.').to_string()
}

/// Ceiling for a transaction description, imposed by the host's
/// transaction log format.
pub const MAX_TRANSACTION_NOTE: usize = 65533;

/// The host's transaction, as far as notes are concerned.
pub trait TransactionJournal {
    fn description(&self) -> &str;

    fn note(&mut self, note: &str);
}

/// Write a human legible note on the current transaction. Notes that
/// would push the description over the size ceiling are dropped with a
/// warning.
pub fn transaction_note(journal: &mut dyn TransactionJournal, note: &str) {
    if journal.description().len() + note.len() >= MAX_TRANSACTION_NOTE {
        warn!("Transaction note too large omitting {note}");
    } else {
        journal.note(note);
    }
}

/// Content types considered user friendly for search and selection
/// purposes: the registered types minus `types_not_searched`,
/// optionally narrowed to a candidate list.
pub fn user_friendly_types(
    registry: &SettingsRegistry,
    types: &TypeRegistry,
    candidates: Option<&[String]>,
) -> Vec<String> {
    let search: SearchSettings = registry.read().unwrap_or_default();
    let mut friendly: Vec<String> = types
        .names()
        .filter(|name| match candidates {
            Some(candidates) => candidates.iter().any(|c| c == name),
            None => true,
        })
        .filter(|name| !search.types_not_searched.iter().any(|t| t == name))
        .map(str::to_string)
        .collect();
    friendly.sort();
    friendly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TypeInfo;
    use serde_json::json;

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int(&json!(45), 0), 45);
        assert_eq!(safe_int(&json!("42"), 0), 42);
        assert_eq!(safe_int(&json!(" 42 "), 0), 42);
        assert_eq!(safe_int(&json!(7.9), 0), 7);
        assert_eq!(safe_int(&json!("spam"), 0), 0);
        assert_eq!(safe_int(&json!([]), 0), 0);
        assert_eq!(safe_int(&Value::Null, 0), 0);
        assert_eq!(safe_int(&Value::Null, -1), -1);
        assert_eq!(safe_int(&json!(true), 0), 1);
    }

    #[test]
    fn test_safe_int_is_idempotent() {
        for value in [json!(45), json!("42"), json!("spam"), Value::Null] {
            let once = safe_int(&value, 0);
            let twice = safe_int(&json!(once), 0);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_safe_text_roundtrip() {
        assert_eq!(safe_text(b"spam", TextEncoding::Utf8), "spam");
        assert_eq!(safe_text("sp\u{e4}m".as_bytes(), TextEncoding::Utf8), "sp\u{e4}m");
        assert_eq!(
            safe_text(&safe_bytes("sp\u{e4}m", TextEncoding::Latin1), TextEncoding::Latin1),
            "sp\u{e4}m"
        );
        // U+01B5 as UTF-8 survives a requested ASCII decode via the
        // lossless fallback.
        let bytes = "\u{1b5}".as_bytes();
        assert_eq!(safe_text(bytes, TextEncoding::Ascii), "\u{1b5}");
    }

    #[test]
    fn test_safe_bytes() {
        assert_eq!(safe_bytes("sp\u{e4}m", TextEncoding::Utf8), b"sp\xc3\xa4m");
        assert_eq!(safe_bytes("sp\u{e4}m", TextEncoding::Latin1), b"sp\xe4m");
        assert_eq!(safe_bytes("sp\u{1b5}m", TextEncoding::Ascii), b"sp?m");
    }

    #[test]
    fn test_human_readable_size_int() {
        assert_eq!(human_readable_size(0i64), "0 KB");
        assert_eq!(human_readable_size(1i64), "1 KB");
        let mut size = 1000i64;
        assert_eq!(human_readable_size(size), "1 KB");
        size += 24;
        assert_eq!(human_readable_size(size), "1.0 KB");
        size += 512;
        assert_eq!(human_readable_size(size), "1.5 KB");
        size *= 1024;
        assert_eq!(human_readable_size(size), "1.5 MB");
        size *= 1024;
        assert_eq!(human_readable_size(size), "1.5 GB");
        size *= 1024;
        assert_eq!(human_readable_size(size), "1.5 TB");
        size *= 1024;
        assert_eq!(human_readable_size(size), "1.5 PB");
        size *= 1024;
        assert_eq!(human_readable_size(size), "1536.0 PB");
    }

    #[test]
    fn test_human_readable_size_float_and_special() {
        assert_eq!(human_readable_size(0.0), "0 KB");
        assert_eq!(human_readable_size(1.0), "1 KB");
        assert_eq!(human_readable_size(1_572_864.0), "1.5 MB");
        assert_eq!(human_readable_size(SizeInput::None), "0 KB");
        assert_eq!(human_readable_size(""), "0 KB");
        assert_eq!(human_readable_size("barney"), "barney");
        assert_eq!(human_readable_size("2048"), "2.0 KB");
        assert_eq!(human_readable_size(f64::NAN), "NaN");
    }

    #[test]
    fn test_human_readable_size_monotonic_at_boundaries() {
        assert_eq!(human_readable_size(1023i64), "1 KB");
        assert_eq!(human_readable_size(1024i64), "1.0 KB");
        assert_eq!(human_readable_size(1048i64), "1.0 KB");
    }

    #[test]
    fn test_crop_text() {
        assert_eq!(crop_text("short", 20, "..."), "short");
        assert_eq!(
            crop_text("the quick brown fox jumps", 15, "..."),
            "the quick..."
        );
        // No word boundary within range: hard cut.
        assert_eq!(crop_text("abcdefghij", 4, "..."), "abcd...");
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("Front Page"), "front-page");
        assert_eq!(normalize_id("  Annual Report (2024)!  "), "annual-report-2024");
        assert_eq!(normalize_id("already-fine_1.txt"), "already-fine_1.txt");
    }

    #[derive(Default)]
    struct RecordingJournal {
        description: String,
    }

    impl TransactionJournal for RecordingJournal {
        fn description(&self) -> &str {
            &self.description
        }

        fn note(&mut self, note: &str) {
            if !self.description.is_empty() {
                self.description.push('\n');
            }
            self.description.push_str(note);
        }
    }

    #[test]
    fn test_transaction_note() {
        let mut journal = RecordingJournal::default();
        transaction_note(&mut journal, "renamed front-page");
        assert_eq!(journal.description(), "renamed front-page");

        // An oversized note is dropped, not truncated.
        let huge = "x".repeat(MAX_TRANSACTION_NOTE);
        transaction_note(&mut journal, &huge);
        assert_eq!(journal.description(), "renamed front-page");
    }

    #[test]
    fn test_user_friendly_types() {
        let mut types = TypeRegistry::new();
        for name in ["Document", "Folder", "Site", "Temp Folder"] {
            types.register(name, TypeInfo::new(name));
        }
        let mut registry = SettingsRegistry::new();
        registry.install_defaults::<SearchSettings>().unwrap();

        let friendly = user_friendly_types(&registry, &types, None);
        assert_eq!(friendly, vec!["Document", "Folder"]);

        let narrowed = user_friendly_types(
            &registry,
            &types,
            Some(&["Folder".to_string(), "Site".to_string()]),
        );
        assert_eq!(narrowed, vec!["Folder"]);
    }
}
