//! Speaker label dialects and the distinct-speaker counter.
//!
//! Transcript producers use two labelling conventions:
//!
//! * modern numbered: `Konuşmacı 1`, `Konuşmacı 2`, … (sometimes misspelled
//!   without Turkish letters — `Konusmaci 1` — by the AI service);
//! * legacy lettered: `A Kişisi`, `B Kişisi`, … mapping by alphabet ordinal
//!   (`A→1`, `B→2`, …).
//!
//! Both dialects resolve here, and only here: the run compressor and the
//! block parser share these helpers instead of carrying their own patterns.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::markdown::strip_markdown;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

// `konu[şs]mac[ıi]` accepts the canonical spelling plus the ASCII-only
// misspellings the AI service is known to produce.
static NUMBERED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^konu[şs]mac[ıi]\s+(\d+)\s*(?:\[(\d{1,2}[:.]\d{2})\])?\s*:\s*(.*)$").unwrap()
});

static LEGACY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z])\s+ki[şs]isi\s*(?:\[(\d{1,2}[:.]\d{2})\])?\s*:\s*(.*)$").unwrap()
});

static NUMBERED_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^konu[şs]mac[ıi]\s+(\d+)$").unwrap());

static LEGACY_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-z])\s+ki[şs]isi$").unwrap());

static NUMBERED_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)konu[şs]mac[ıi]\s+(\d+)").unwrap());

static LEGACY_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([a-z])\s+ki[şs]isi\b").unwrap());

// ---------------------------------------------------------------------------
// SpeakerHeader
// ---------------------------------------------------------------------------

/// A parsed speaker header line (icon already removed by the caller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerHeader {
    /// Canonical speaker number (`Konuşmacı 3` and `C Kişisi` both give 3).
    pub id: u32,
    /// Bracketed timestamp, when present.
    pub time: Option<String>,
    /// Text after the colon, untrimmed of inline markup.
    pub content: String,
}

/// Parse a `<speaker-word> <N> [time]?: content` line in either dialect.
///
/// Returns `None` for anything that is not a speaker header. The caller is
/// expected to have stripped a leading icon first (see
/// [`MarkerConfig::strip_speaker_icon`](crate::config::MarkerConfig::strip_speaker_icon)).
pub fn parse_speaker_header(text: &str) -> Option<SpeakerHeader> {
    let text = text.trim();

    if let Some(caps) = NUMBERED_HEADER.captures(text) {
        let id: u32 = caps[1].parse().ok()?;
        return Some(SpeakerHeader {
            id,
            time: caps.get(2).map(|m| m.as_str().to_string()),
            content: caps[3].trim().to_string(),
        });
    }

    if let Some(caps) = LEGACY_HEADER.captures(text) {
        let letter = caps[1].chars().next()?;
        let id = legacy_letter_number(letter)?;
        return Some(SpeakerHeader {
            id,
            time: caps.get(2).map(|m| m.as_str().to_string()),
            content: caps[3].trim().to_string(),
        });
    }

    None
}

// ---------------------------------------------------------------------------
// Label canonicalization
// ---------------------------------------------------------------------------

/// The canonical label for speaker `n`.
pub fn canonical_label(n: u32) -> String {
    format!("Konuşmacı {n}")
}

/// Map a legacy dialect letter to its speaker number: `A→1 … Z→26`.
pub fn legacy_letter_number(letter: char) -> Option<u32> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some(upper as u32 - 'A' as u32 + 1)
    } else {
        None
    }
}

/// Normalise a free-form speaker label to its canonical form.
///
/// Markdown emphasis is stripped first; labels in either known dialect are
/// rewritten to `Konuşmacı <N>`, anything else passes through cleaned.
///
/// ```
/// use voice_notes::structure::unify_speaker_label;
///
/// assert_eq!(unify_speaker_label("**Konusmaci 2**"), "Konuşmacı 2");
/// assert_eq!(unify_speaker_label("B Kişisi"), "Konuşmacı 2");
/// assert_eq!(unify_speaker_label("Ayşe"), "Ayşe");
/// ```
pub fn unify_speaker_label(label: &str) -> String {
    let cleaned = strip_markdown(label);

    if let Some(caps) = NUMBERED_LABEL.captures(&cleaned) {
        if let Ok(n) = caps[1].parse::<u32>() {
            return canonical_label(n);
        }
    }

    if let Some(caps) = LEGACY_LABEL.captures(&cleaned) {
        if let Some(letter) = caps[1].chars().next() {
            if let Some(n) = legacy_letter_number(letter) {
                return canonical_label(n);
            }
        }
    }

    cleaned
}

// ---------------------------------------------------------------------------
// Speaker counting
// ---------------------------------------------------------------------------

/// Count distinct speakers mentioned in `text`.
///
/// Numbered labels win when present; otherwise legacy letters are counted;
/// otherwise the text is attributed to a single speaker. Set-backed, so the
/// result is independent of ordering and repetition.
///
/// ```
/// use voice_notes::structure::count_speakers;
///
/// assert_eq!(count_speakers("Konuşmacı 1: a\nKonuşmacı 2: b\nKonuşmacı 1: c"), 2);
/// assert_eq!(count_speakers("zaman damgasız düz metin"), 1);
/// ```
pub fn count_speakers(text: &str) -> usize {
    let numbered: HashSet<u32> = NUMBERED_ANY
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    if !numbered.is_empty() {
        return numbered.len().max(1);
    }

    let legacy: HashSet<char> = LEGACY_ANY
        .captures_iter(text)
        .filter_map(|caps| caps[1].chars().next())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !legacy.is_empty() {
        return legacy.len().max(1);
    }

    1
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- parse_speaker_header ---

    #[test]
    fn parses_numbered_header_with_time() {
        let h = parse_speaker_header("Konuşmacı 1 [00:05]: Merhaba").unwrap();
        assert_eq!(h.id, 1);
        assert_eq!(h.time.as_deref(), Some("00:05"));
        assert_eq!(h.content, "Merhaba");
    }

    #[test]
    fn parses_numbered_header_without_time() {
        let h = parse_speaker_header("Konuşmacı 12: Nasılsın").unwrap();
        assert_eq!(h.id, 12);
        assert!(h.time.is_none());
        assert_eq!(h.content, "Nasılsın");
    }

    #[test]
    fn parses_misspelled_speaker_word() {
        let h = parse_speaker_header("Konusmaci 3: test").unwrap();
        assert_eq!(h.id, 3);
    }

    #[test]
    fn parses_legacy_header() {
        let h = parse_speaker_header("B Kişisi [01:10]: Evet").unwrap();
        assert_eq!(h.id, 2);
        assert_eq!(h.time.as_deref(), Some("01:10"));
        assert_eq!(h.content, "Evet");
    }

    #[test]
    fn parses_legacy_header_ascii_spelling() {
        let h = parse_speaker_header("C Kisisi: tamam").unwrap();
        assert_eq!(h.id, 3);
    }

    #[test]
    fn header_with_empty_content_parses() {
        let h = parse_speaker_header("Konuşmacı 1 [00:05]:").unwrap();
        assert_eq!(h.content, "");
        assert_eq!(h.time.as_deref(), Some("00:05"));
    }

    #[test]
    fn plain_text_is_not_a_header() {
        assert!(parse_speaker_header("Merhaba dünya").is_none());
        assert!(parse_speaker_header("Konuşmacı bir: x").is_none());
        assert!(parse_speaker_header("[00:05] devam").is_none());
    }

    // ---- legacy_letter_number ---

    #[test]
    fn letters_map_to_alphabet_ordinal() {
        assert_eq!(legacy_letter_number('A'), Some(1));
        assert_eq!(legacy_letter_number('B'), Some(2));
        assert_eq!(legacy_letter_number('Z'), Some(26));
        assert_eq!(legacy_letter_number('a'), Some(1));
    }

    #[test]
    fn non_letters_do_not_map() {
        assert_eq!(legacy_letter_number('1'), None);
        assert_eq!(legacy_letter_number('%'), None);
    }

    // ---- unify_speaker_label ---

    #[test]
    fn unifies_bold_numbered_label() {
        assert_eq!(unify_speaker_label("**Konuşmacı 2**"), "Konuşmacı 2");
    }

    #[test]
    fn unifies_misspelled_label() {
        assert_eq!(unify_speaker_label("Konusmaci 5"), "Konuşmacı 5");
    }

    #[test]
    fn unifies_legacy_label() {
        assert_eq!(unify_speaker_label("A Kişisi"), "Konuşmacı 1");
        assert_eq!(unify_speaker_label("d kisisi"), "Konuşmacı 4");
    }

    #[test]
    fn unknown_label_passes_through_cleaned() {
        assert_eq!(unify_speaker_label("**Ayşe**"), "Ayşe");
    }

    // ---- count_speakers ---

    #[test]
    fn counts_distinct_numbered_speakers() {
        let text = "Konuşmacı 1: a\nKonuşmacı 2: b\nKonuşmacı 1: c\nKonuşmacı 2: d";
        assert_eq!(count_speakers(text), 2);
    }

    #[test]
    fn counting_is_case_insensitive() {
        assert_eq!(count_speakers("KONUŞMACI 1: a\nkonuşmacı 2: b"), 2);
    }

    #[test]
    fn numbered_wins_over_legacy() {
        // Mixed dialects: numbered labels decide the count.
        let text = "Konuşmacı 1: a\nB Kişisi: b";
        assert_eq!(count_speakers(text), 1);
    }

    #[test]
    fn counts_distinct_legacy_letters() {
        let text = "A Kişisi: a\nB Kişisi: b\na kişisi: tekrar";
        assert_eq!(count_speakers(text), 2);
    }

    #[test]
    fn no_markers_counts_as_one() {
        assert_eq!(count_speakers("hiç konuşmacı etiketi yok"), 1);
        assert_eq!(count_speakers(""), 1);
    }
}
