//! Speaker-run compression.
//!
//! Consecutive lines attributed to the same speaker are merged: the header
//! appears once and every following line of the run becomes an indented
//! continuation bullet. The scan is strictly line-local with one scalar of
//! carried state ([`ScanState`]) threaded through an explicit per-line
//! transition function — no closures, no lookahead.
//!
//! ```text
//! 👤 Konuşmacı 1 [00:00]: Merhaba        👤 Konuşmacı 1 [00:00]: Merhaba
//! 👤 Konuşmacı 1 [00:05]: Nasılsın   →     • [00:05] Nasılsın
//! 👤 Konuşmacı 2 [00:09]: İyiyim         👤 Konuşmacı 2 [00:09]: İyiyim
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MarkerConfig;

use super::speaker::parse_speaker_header;

/// Standalone `[mm:ss] content` line — a continuation of the current run
/// when one is open.
static TIME_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[(\d{1,2}:\d{2})\]\s*(.*)$").unwrap());

/// ATX heading prefix (`#`, `##` or `###`).
static ATX_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,3}(?:[^#].*)?$").unwrap());

/// Bare bullet marker with no content; dropped by the tidy pass.
static EMPTY_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[•\-]\s*$").unwrap());

// ---------------------------------------------------------------------------
// ScanState
// ---------------------------------------------------------------------------

/// The single scalar of state carried across lines: which speaker's run is
/// currently open, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Speaker number of the open run; `None` outside any run.
    pub last_speaker: Option<u32>,
}

impl ScanState {
    fn open(id: u32) -> Self {
        Self {
            last_speaker: Some(id),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Merge consecutive same-speaker lines of timestamp-normalized `text` into
/// continuation bullets, then tidy (collapse 3+ blank lines to one, drop
/// bare bullet markers, trim trailing whitespace).
///
/// Deterministic and idempotent: running it on its own output is a no-op.
pub fn compress_speaker_runs(text: &str, markers: &MarkerConfig) -> String {
    let mut state = ScanState::default();
    let mut emitted: Vec<String> = Vec::new();

    for line in text.lines() {
        let (output, next) = scan_line(line, state, markers);
        if let Some(out) = output {
            emitted.push(out);
        }
        state = next;
    }

    tidy(emitted)
}

// ---------------------------------------------------------------------------
// Transition function
// ---------------------------------------------------------------------------

/// Process one line: returns the emitted output (or `None` to drop the line)
/// and the state carried into the next line.
fn scan_line(line: &str, state: ScanState, markers: &MarkerConfig) -> (Option<String>, ScanState) {
    // 1. Blank line: emitted as-is, closes any open run.
    if line.trim().is_empty() {
        return (Some(String::new()), ScanState::default());
    }

    // 2. Speaker header (either dialect, optional icon).
    let without_icon = markers.strip_speaker_icon(line).unwrap_or(line);
    if let Some(header) = parse_speaker_header(without_icon) {
        if state.last_speaker == Some(header.id) {
            // Same speaker again: fold into the run as a continuation bullet.
            return (
                continuation(header.time.as_deref(), &header.content),
                state,
            );
        }
        // New speaker: keep the full header line, open its run.
        return (
            Some(line.trim_end().to_string()),
            ScanState::open(header.id),
        );
    }

    // 3. Structural heading: closes any open run.
    if is_structural_heading(line, markers) {
        return (Some(line.trim_end().to_string()), ScanState::default());
    }

    // 4. Standalone timed line inside a run: fold in as a continuation.
    if state.last_speaker.is_some() {
        if let Some(caps) = TIME_CONTINUATION.captures(line) {
            let content = caps[2].trim().to_string();
            return (continuation(Some(&caps[1]), &content), state);
        }
    }

    // 5. Anything else passes through.
    (Some(line.trim_end().to_string()), state)
}

/// Format a continuation bullet; `None` when there is nothing to say.
fn continuation(time: Option<&str>, content: &str) -> Option<String> {
    match (time, content.is_empty()) {
        (None, true) => None,
        (Some(t), true) => Some(format!("  • [{t}]")),
        (None, false) => Some(format!("  • {content}")),
        (Some(t), false) => Some(format!("  • [{t}] {content}")),
    }
}

/// Heading icon prefix or ATX `#` prefix.
fn is_structural_heading(line: &str, markers: &MarkerConfig) -> bool {
    markers.strip_heading_icon(line).is_some() || ATX_PREFIX.is_match(line.trim())
}

// ---------------------------------------------------------------------------
// Tidy pass
// ---------------------------------------------------------------------------

/// Collapse runs of 3+ blank lines to exactly one, drop bare bullet markers,
/// and trim trailing whitespace from the whole result.
fn tidy(lines: Vec<String>) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut pending_blanks = 0usize;

    for line in lines {
        if EMPTY_BULLET.is_match(&line) {
            continue;
        }
        if line.trim().is_empty() {
            pending_blanks += 1;
            continue;
        }
        let emit = if pending_blanks >= 3 { 1 } else { pending_blanks };
        for _ in 0..emit {
            kept.push(String::new());
        }
        pending_blanks = 0;
        kept.push(line);
    }

    kept.join("\n").trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> MarkerConfig {
        MarkerConfig::default()
    }

    fn compress(text: &str) -> String {
        compress_speaker_runs(text, &markers())
    }

    // ---- scan_line transitions ---

    #[test]
    fn blank_line_resets_state() {
        let state = ScanState::open(1);
        let (out, next) = scan_line("", state, &markers());
        assert_eq!(out.as_deref(), Some(""));
        assert_eq!(next, ScanState::default());
    }

    #[test]
    fn new_speaker_opens_run_and_keeps_line() {
        let line = "👤 Konuşmacı 1 [00:00]: Merhaba";
        let (out, next) = scan_line(line, ScanState::default(), &markers());
        assert_eq!(out.as_deref(), Some(line));
        assert_eq!(next, ScanState::open(1));
    }

    #[test]
    fn same_speaker_becomes_continuation_bullet() {
        let (out, next) = scan_line(
            "👤 Konuşmacı 1 [00:05]: Nasılsın",
            ScanState::open(1),
            &markers(),
        );
        assert_eq!(out.as_deref(), Some("  • [00:05] Nasılsın"));
        assert_eq!(next, ScanState::open(1));
    }

    #[test]
    fn same_speaker_without_time_or_content_emits_nothing() {
        let (out, next) = scan_line("👤 Konuşmacı 1:", ScanState::open(1), &markers());
        assert!(out.is_none());
        assert_eq!(next, ScanState::open(1));
    }

    #[test]
    fn heading_resets_state() {
        let (out, next) = scan_line("📋 BAŞLIK: Toplantı", ScanState::open(2), &markers());
        assert_eq!(out.as_deref(), Some("📋 BAŞLIK: Toplantı"));
        assert_eq!(next, ScanState::default());

        let (_, next) = scan_line("## Özet", ScanState::open(2), &markers());
        assert_eq!(next, ScanState::default());
    }

    #[test]
    fn timed_line_inside_run_becomes_bullet() {
        let (out, next) = scan_line("[00:12] devam ediyorum", ScanState::open(1), &markers());
        assert_eq!(out.as_deref(), Some("  • [00:12] devam ediyorum"));
        assert_eq!(next, ScanState::open(1));
    }

    #[test]
    fn timed_line_outside_run_passes_through() {
        let (out, next) = scan_line("[00:12] devam", ScanState::default(), &markers());
        assert_eq!(out.as_deref(), Some("[00:12] devam"));
        assert_eq!(next, ScanState::default());
    }

    #[test]
    fn plain_line_passes_through_keeping_state() {
        let (out, next) = scan_line("düz metin", ScanState::open(4), &markers());
        assert_eq!(out.as_deref(), Some("düz metin"));
        assert_eq!(next, ScanState::open(4));
    }

    // ---- full pass ---

    #[test]
    fn merges_consecutive_same_speaker_lines() {
        let input = "👤 Konuşmacı 1 [00:00]: Merhaba\n👤 Konuşmacı 1 [00:05]: Nasılsın";
        let expected = "👤 Konuşmacı 1 [00:00]: Merhaba\n  • [00:05] Nasılsın";
        assert_eq!(compress(input), expected);
    }

    #[test]
    fn different_speaker_keeps_own_header() {
        let input = "👤 Konuşmacı 1 [00:00]: Merhaba\n👤 Konuşmacı 2 [00:05]: İyiyim";
        assert_eq!(compress(input), input);
    }

    #[test]
    fn legacy_dialect_compresses_too() {
        let input = "A Kişisi [00:00]: bir\nA Kişisi [00:04]: iki";
        let expected = "A Kişisi [00:00]: bir\n  • [00:04] iki";
        assert_eq!(compress(input), expected);
    }

    #[test]
    fn blank_line_splits_runs() {
        let input = "👤 Konuşmacı 1 [00:00]: bir\n\n👤 Konuşmacı 1 [00:05]: iki";
        // The blank line closes the run, so the second header survives.
        assert_eq!(compress(input), input);
    }

    #[test]
    fn collapses_three_plus_blank_lines() {
        let input = "bir\n\n\n\niki";
        assert_eq!(compress(input), "bir\n\niki");
    }

    #[test]
    fn keeps_two_blank_lines() {
        let input = "bir\n\n\niki";
        assert_eq!(compress(input), "bir\n\n\niki");
    }

    #[test]
    fn drops_bare_bullet_markers() {
        let input = "bir\n•\n  -  \niki";
        assert_eq!(compress(input), "bir\niki");
    }

    #[test]
    fn trims_trailing_whitespace() {
        assert_eq!(compress("satır   \n\n\n"), "satır");
    }

    #[test]
    fn is_idempotent() {
        let input = "📋 BAŞLIK: Toplantı\n👤 Konuşmacı 1 [00:01]: Merhaba\n👤 Konuşmacı 1 [00:03]: Nasılsın\n\n\n\n👤 Konuşmacı 2 [00:05]: İyiyim\n•\n";
        let once = compress(input);
        let twice = compress(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(compress(""), "");
    }
}
