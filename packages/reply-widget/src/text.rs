//! Pure string helpers shared with the presentation layer.

use chrono::{DateTime, TimeZone, Timelike};

/// Trim surrounding whitespace and cap the text at `max` characters.
///
/// When the text is longer than `max`, the result is the first `max - 1`
/// characters followed by an ellipsis, so the output never exceeds `max`
/// characters. `None` yields an empty string. Counts characters, not bytes,
/// so multi-byte input is never split mid-character.
pub fn trim_text(text: Option<&str>, max: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let clean = text.trim();
    if clean.chars().count() <= max {
        return clean.to_string();
    }
    let mut out: String = clean.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Format a timestamp as a zero-padded `HH:MM` clock time.
pub fn format_clock_time<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn trim_text_truncates_with_ellipsis() {
        let out = trim_text(Some("0123456789"), 5);
        assert_eq!(out, "0123…");
        assert_eq!(out.chars().count(), 5);
    }

    #[test]
    fn trim_text_returns_short_input_unchanged() {
        assert_eq!(trim_text(Some("hello"), 5), "hello");
        assert_eq!(trim_text(Some("hi"), 5), "hi");
    }

    #[test]
    fn trim_text_none_is_empty() {
        assert_eq!(trim_text(None, 10), "");
    }

    #[test]
    fn trim_text_strips_surrounding_whitespace() {
        assert_eq!(trim_text(Some("  padded  "), 20), "padded");
    }

    #[test]
    fn trim_text_counts_characters_not_bytes() {
        let out = trim_text(Some("héllo wörld"), 6);
        assert_eq!(out.chars().count(), 6);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn format_clock_time_zero_pads() {
        let t = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
        assert_eq!(format_clock_time(&t), "07:05");
    }
}
