// File: src/model/parser.rs
//
// Extraction of the metadata that lives inside a task's free text.
//
// Grammar (each piece is a standalone function):
//   duration  := DIGIT+ ("m" | "h")            anywhere in the text, first match wins
//   due date  := "📅" WS* DIGIT{4} "-" DIGIT{2} "-" DIGIT{2}
//   tag       := literal substring, e.g. "#waiting"
//
// Extraction and cleanup use different duration patterns. `extract_minutes`
// accepts any `<int><unit>`, while `clean_text` only strips the clock-prefixed
// form `⏲ <int><unit>`. So "Call client 45m" counts 45 minutes but keeps "45m"
// in the display text. Keep the two patterns separate.
use crate::model::item::{ParsedTask, RawTask, WILL_NOT_DO_STATUS};
use chrono::NaiveDate;
use std::ops::Range;

pub const CLOCK_MARKER: &str = "⏲ ";
pub const CALENDAR_MARKER: char = '📅';
pub const DEFAULT_WAITING_TAG: &str = "#waiting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minutes,
    Hours,
}

impl DurationUnit {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'm' => Some(Self::Minutes),
            b'h' => Some(Self::Hours),
            _ => None,
        }
    }

    pub fn to_minutes(self, value: u32) -> Option<u32> {
        match self {
            Self::Minutes => Some(value),
            Self::Hours => value.checked_mul(60),
        }
    }
}

/// Length of the ASCII digit run at the start of `s`.
fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Finds the first `<digits><m|h>` in `text`.
///
/// Returns the byte range of the whole match, the digit slice and the unit.
fn find_duration(text: &str) -> Option<(Range<usize>, &str, DurationUnit)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let end = i + digit_run(&text[i..]);
        if let Some(unit) = bytes.get(end).copied().and_then(DurationUnit::from_byte) {
            return Some((i..end + 1, &text[i..end], unit));
        }
        // A shorter suffix of this run is followed by a digit, never a unit.
        i = end;
    }
    None
}

/// Finds the first `⏲ <digits><m|h>` in `text`.
fn find_clock_duration(text: &str) -> Option<Range<usize>> {
    text.match_indices(CLOCK_MARKER).find_map(|(idx, marker)| {
        let start = idx + marker.len();
        let digits = digit_run(&text[start..]);
        if digits == 0 {
            return None;
        }
        let unit_at = start + digits;
        DurationUnit::from_byte(*text.as_bytes().get(unit_at)?)?;
        Some(idx..unit_at + 1)
    })
}

/// Matches exactly `DDDD-DD-DD` at the start of `s`.
fn is_iso_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 10 {
        return false;
    }
    b[..10].iter().enumerate().all(|(i, c)| match i {
        4 | 7 => *c == b'-',
        _ => c.is_ascii_digit(),
    })
}

/// Finds the first `📅 YYYY-MM-DD` marker.
///
/// Returns the byte range of the whole marker and the date slice. The slice
/// has the right shape but is not validated as a calendar date.
fn find_date_marker(text: &str) -> Option<(Range<usize>, &str)> {
    text.match_indices(CALENDAR_MARKER).find_map(|(idx, marker)| {
        let after = idx + marker.len();
        let rest = &text[after..];
        let ws = rest.len() - rest.trim_start().len();
        let start = after + ws;
        if is_iso_date_shape(&text[start..]) {
            Some((idx..start + 10, &text[start..start + 10]))
        } else {
            None
        }
    })
}

/// Estimated minutes from the first `<int>m` / `<int>h` in the text.
///
/// Values that overflow `u32` minutes are treated as absent.
pub fn extract_minutes(text: &str) -> Option<u32> {
    let (_, digits, unit) = find_duration(text)?;
    unit.to_minutes(digits.parse().ok()?)
}

/// Raw date string after the first calendar marker, shape-checked only.
pub fn extract_due_date_str(text: &str) -> Option<&str> {
    find_date_marker(text).map(|(_, date)| date)
}

/// Due date from the first calendar marker.
///
/// A marker with the right digit shape but an impossible date (`2024-02-30`)
/// yields `None`.
pub fn extract_due_date(text: &str) -> Option<NaiveDate> {
    let raw = extract_due_date_str(text)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn has_tag(text: &str, tag: &str) -> bool {
    text.contains(tag)
}

/// Strips the first clock-prefixed duration, then the first date marker, then trims.
pub fn clean_text(text: &str) -> String {
    let mut out = text.to_string();
    if let Some(range) = find_clock_duration(&out) {
        out.replace_range(range, "");
    }
    let date_range = find_date_marker(&out).map(|(range, _)| range);
    if let Some(range) = date_range {
        out.replace_range(range, "");
    }
    out.trim().to_string()
}

/// Parses a raw task using the default `#waiting` tag.
pub fn parse(raw: &RawTask) -> ParsedTask {
    parse_with_tag(raw, DEFAULT_WAITING_TAG)
}

pub fn parse_with_tag(raw: &RawTask, waiting_tag: &str) -> ParsedTask {
    ParsedTask {
        text: clean_text(&raw.text),
        minutes: extract_minutes(&raw.text),
        due_date: extract_due_date(&raw.text),
        is_waiting: has_tag(&raw.text, waiting_tag),
        completed: raw.completed,
        will_not_do: raw.status == WILL_NOT_DO_STATUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_skips_digit_runs_without_unit() {
        assert_eq!(extract_minutes("12x3h"), Some(180));
        assert_eq!(extract_minutes("📅 2024-06-01 then 5m"), Some(5));
        assert_eq!(extract_minutes("10min"), Some(10));
    }

    #[test]
    fn test_duration_first_match_wins() {
        assert_eq!(extract_minutes("2h then 30m"), Some(120));
    }

    #[test]
    fn test_duration_overflow_is_absent() {
        assert_eq!(extract_minutes("99999999999999m"), None);
        assert_eq!(extract_minutes("4294967295h"), None);
    }

    #[test]
    fn test_clock_duration_needs_exact_marker() {
        assert_eq!(find_clock_duration("a ⏲ 2h b"), Some(2..8));
        assert_eq!(find_clock_duration("a ⏲2h b"), None);
        assert_eq!(find_clock_duration("⏲ x ⏲ 5m"), Some(6..12));
    }

    #[test]
    fn test_date_marker_whitespace_is_optional() {
        assert_eq!(extract_due_date_str("📅2024-03-15"), Some("2024-03-15"));
        assert_eq!(extract_due_date_str("📅   2024-03-15"), Some("2024-03-15"));
        assert_eq!(extract_due_date_str("📅 2024-3-15"), None);
        assert_eq!(extract_due_date_str("2024-03-15"), None);
    }

    #[test]
    fn test_first_well_shaped_marker_wins() {
        assert_eq!(
            extract_due_date_str("📅 soon 📅 2024-03-15"),
            Some("2024-03-15")
        );
        // The first shaped match is chosen even when it is not a real date.
        assert_eq!(extract_due_date("📅 2024-02-30 📅 2024-03-01"), None);
    }

    #[test]
    fn test_clean_text_removes_markers_in_order() {
        assert_eq!(clean_text("  A ⏲ 15m 📅 2024-01-02  "), "A");
        assert_eq!(clean_text("A 📅 2024-01-02 B"), "A  B");
    }
}
