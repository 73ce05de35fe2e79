//! Timestamp notation canonicalization.
//!
//! The live recognizer emits canonical `[mm:ss]` tags; the AI improvement
//! service sometimes comes back with a `[m.ss]` dot notation instead. This
//! pass rewrites every bracketed dot timestamp to the canonical colon form
//! with both fields zero-padded, and leaves every other bracket untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Bracketed `minute.second`: 1–2 digit minute, exactly 2-digit second,
/// separated by a literal dot.
static DOT_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d{1,2})\.(\d{2})\]").unwrap());

/// Rewrite every `[m.ss]` occurrence in `text` to `[mm:ss]`.
///
/// Non-matching bracket content (including already-canonical `[mm:ss]` tags)
/// passes through verbatim, so the function is idempotent and total.
///
/// ```
/// use voice_notes::structure::normalize_timestamps;
///
/// assert_eq!(normalize_timestamps("[4.05] Merhaba"), "[04:05] Merhaba");
/// assert_eq!(normalize_timestamps("[12:30] zaten"), "[12:30] zaten");
/// ```
pub fn normalize_timestamps(text: &str) -> String {
    DOT_TIMESTAMP
        .replace_all(text, |caps: &Captures| {
            let minutes: u32 = caps[1].parse().unwrap_or(0);
            let seconds: u32 = caps[2].parse().unwrap_or(0);
            format!("[{minutes:02}:{seconds:02}]")
        })
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digit_minute_is_zero_padded() {
        assert_eq!(normalize_timestamps("[4.05]"), "[04:05]");
    }

    #[test]
    fn two_digit_minute_is_kept() {
        assert_eq!(normalize_timestamps("[12.30]"), "[12:30]");
    }

    #[test]
    fn canonical_timestamp_is_unchanged() {
        assert_eq!(normalize_timestamps("[12:30]"), "[12:30]");
    }

    #[test]
    fn rewrites_all_occurrences_in_a_line() {
        assert_eq!(
            normalize_timestamps("[0.01] bir [1.15] iki [10.59] üç"),
            "[00:01] bir [01:15] iki [10:59] üç"
        );
    }

    #[test]
    fn non_timestamp_brackets_pass_through() {
        assert_eq!(normalize_timestamps("[not] [1.2] [123.45]"), "[not] [1.2] [123.45]");
    }

    #[test]
    fn single_digit_second_does_not_match() {
        // Second field must be exactly two digits.
        assert_eq!(normalize_timestamps("[4.5]"), "[4.5]");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_timestamps("[4.05] a [12.30] b [not]");
        let twice = normalize_timestamps(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(normalize_timestamps(""), "");
    }
}
