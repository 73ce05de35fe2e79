//! Line classification into typed blocks.
//!
//! Every non-blank line of normalized text runs through an explicit, ordered
//! slice of pure classifier functions — first match wins. The order is part
//! of the contract (a line matching several classifiers resolves to the
//! earliest), so reordering [`CLASSIFIERS`] changes observable behaviour.
//!
//! Bullet lines accumulate in a pending buffer that flushes as a single
//! [`Block::BulletList`] on a blank line, any non-bullet classification, or
//! end of input. Unclaimed lines degrade to [`Block::Paragraph`]; the parser
//! is total and never panics.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MarkerConfig;

use super::block::Block;
use super::markdown::strip_markdown;
use super::speaker::{canonical_label, parse_speaker_header, unify_speaker_label};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Rule 3: `**Konuşmacı N**? [time]?: content`, emphasis and misspellings
/// tolerated.
static BOLD_SPEAKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\*{0,3}\s*konu[şs]mac[ıi]\s+(\d+)\s*\*{0,3}\s*(?:\[(\d{1,2}[:.]\d{2})\])?\s*:\s*(.*)$",
    )
    .unwrap()
});

/// Rule 4 (after icon stripping): `Label [time]?: content`.
static LABELLED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:\[\]]+?)\s*(?:\[(\d{1,2}[:.]\d{2})\])?\s*:\s*(.*)$").unwrap()
});

/// Rule 5: `-`/`•` bullet marker.
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[•\-]\s+(.*)$").unwrap());

/// Rule 6: `**Title**` alone on the line.
static BOLD_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*{2,3}([^*]+)\*{2,3}$").unwrap());

/// Rule 7: ATX heading, 1–3 `#`.
static ATX_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,3}\s*([^#\s].*)$").unwrap());

// ---------------------------------------------------------------------------
// LineClass and the classifier chain
// ---------------------------------------------------------------------------

/// What one non-blank line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineClass {
    /// Decoration or boilerplate; contributes no block but flushes bullets.
    Ignored,
    /// A speaker turn.
    Turn {
        speaker: String,
        time: Option<String>,
        content: String,
    },
    /// A bullet item for the pending buffer.
    Bullet(String),
    /// A heading.
    Heading {
        title: String,
        detail: Option<String>,
    },
    /// Plain paragraph text (the rule-10 default).
    Text(String),
}

type Classifier = fn(&str, &MarkerConfig) -> Option<LineClass>;

/// The fixed classification order. First match wins; do not reorder.
const CLASSIFIERS: &[Classifier] = &[
    separator,
    disclaimer,
    bold_speaker,
    icon_speaker,
    bullet,
    bold_heading,
    atx_heading,
    icon_heading,
    timed_speaker,
];

fn classify_line(line: &str, markers: &MarkerConfig) -> LineClass {
    for classifier in CLASSIFIERS {
        if let Some(class) = classifier(line, markers) {
            return class;
        }
    }
    // Rule 10: anything unclaimed is a paragraph.
    LineClass::Text(strip_markdown(line))
}

// Rule 1: 3+ repeated `-`, `_` or `*`.
fn separator(line: &str, _markers: &MarkerConfig) -> Option<LineClass> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    if !matches!(first, '-' | '_' | '*') {
        return None;
    }
    if trimmed.chars().count() >= 3 && trimmed.chars().all(|c| c == first) {
        Some(LineClass::Ignored)
    } else {
        None
    }
}

// Rule 2: known AI boilerplate prefix.
fn disclaimer(line: &str, markers: &MarkerConfig) -> Option<LineClass> {
    markers.is_disclaimer(line).then_some(LineClass::Ignored)
}

// Rule 3: bold-tolerant numbered speaker.
fn bold_speaker(line: &str, _markers: &MarkerConfig) -> Option<LineClass> {
    let caps = BOLD_SPEAKER.captures(line.trim())?;
    let id: u32 = caps[1].parse().ok()?;
    Some(LineClass::Turn {
        speaker: canonical_label(id),
        time: caps.get(2).map(|m| m.as_str().to_string()),
        content: strip_markdown(&caps[3]),
    })
}

// Rule 4: icon-prefixed speaker line.
fn icon_speaker(line: &str, markers: &MarkerConfig) -> Option<LineClass> {
    let rest = markers.strip_speaker_icon(line)?;
    let caps = LABELLED_LINE.captures(rest.trim())?;
    Some(LineClass::Turn {
        speaker: unify_speaker_label(&caps[1]),
        time: caps.get(2).map(|m| m.as_str().to_string()),
        content: strip_markdown(&caps[3]),
    })
}

// Rule 5: bullet marker.
fn bullet(line: &str, _markers: &MarkerConfig) -> Option<LineClass> {
    let caps = BULLET.captures(line)?;
    Some(LineClass::Bullet(strip_markdown(&caps[1])))
}

// Rule 6: bold-wrapped solitary heading.
fn bold_heading(line: &str, _markers: &MarkerConfig) -> Option<LineClass> {
    let caps = BOLD_HEADING.captures(line.trim())?;
    Some(LineClass::Heading {
        title: strip_markdown(&caps[1]),
        detail: None,
    })
}

// Rule 7: ATX heading.
fn atx_heading(line: &str, _markers: &MarkerConfig) -> Option<LineClass> {
    let caps = ATX_HEADING.captures(line.trim())?;
    Some(LineClass::Heading {
        title: strip_markdown(&caps[1]),
        detail: None,
    })
}

// Rule 8: icon-prefixed structural heading.
fn icon_heading(line: &str, markers: &MarkerConfig) -> Option<LineClass> {
    let rest = markers.strip_heading_icon(line)?;

    if let Some((before, after)) = rest.split_once(':') {
        let label = strip_markdown(before);
        let title = strip_markdown(after);
        if title.is_empty() {
            if label.is_empty() {
                // `📋 :` — nothing usable; rule 10 takes the line.
                return None;
            }
            // `📋 BAŞLIK:` with nothing after the colon — use the label.
            return Some(LineClass::Heading {
                title: label,
                detail: None,
            });
        }
        let detail = if label.is_empty() || markers.is_title_word(&label) {
            None
        } else {
            Some(label)
        };
        return Some(LineClass::Heading { title, detail });
    }

    let title = strip_markdown(rest);
    if title.is_empty() {
        return None;
    }
    Some(LineClass::Heading { title, detail: None })
}

// Rule 9: fallback speaker header — no icon, either dialect, time mandatory.
// The label must actually be a speaker label; `Not [00:05]: önemli` is not
// a turn and falls through to rule 10.
fn timed_speaker(line: &str, _markers: &MarkerConfig) -> Option<LineClass> {
    let header = parse_speaker_header(line.trim())?;
    let time = header.time?;
    Some(LineClass::Turn {
        speaker: canonical_label(header.id),
        time: Some(time),
        content: strip_markdown(&header.content),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse normalized text into an ordered block sequence.
///
/// Total over its input: every non-blank line lands in exactly one block or
/// is absorbed into an adjacent bullet list, and nothing panics.
pub fn parse_blocks(text: &str, markers: &MarkerConfig) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut pending_bullets: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush_bullets(&mut blocks, &mut pending_bullets);
            continue;
        }

        match classify_line(line, markers) {
            LineClass::Ignored => flush_bullets(&mut blocks, &mut pending_bullets),
            LineClass::Bullet(item) => {
                if !item.is_empty() {
                    pending_bullets.push(item);
                }
            }
            LineClass::Turn {
                speaker,
                time,
                content,
            } => {
                flush_bullets(&mut blocks, &mut pending_bullets);
                blocks.push(Block::SpeakerTurn {
                    speaker,
                    time,
                    content,
                });
            }
            LineClass::Heading { title, detail } => {
                flush_bullets(&mut blocks, &mut pending_bullets);
                blocks.push(Block::Heading { title, detail });
            }
            LineClass::Text(content) => {
                flush_bullets(&mut blocks, &mut pending_bullets);
                blocks.push(Block::Paragraph { content });
            }
        }
    }

    flush_bullets(&mut blocks, &mut pending_bullets);
    blocks
}

fn flush_bullets(blocks: &mut Vec<Block>, pending: &mut Vec<String>) {
    if !pending.is_empty() {
        blocks.push(Block::BulletList {
            items: std::mem::take(pending),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
