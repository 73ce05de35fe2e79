//! The typed document model produced by the block parser.
//!
//! A transcript document is an ordered sequence of [`Block`]s. Blocks carry
//! no identity or position beyond their place in the sequence, and are never
//! persisted — every surface recomputes them from the normalized text.

use serde::Serialize;

/// One typed unit of structured transcript content.
///
/// Serialises with a `kind` tag so the preview and exporter can dispatch on
/// it; deliberately not `Deserialize` — blocks are derived values, not
/// stored ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A section heading, optionally qualified (`detail` is e.g. the label
    /// before the colon in `📝 Özet: Toplantı`).
    Heading {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// A contiguous utterance attributed to one speaker.
    SpeakerTurn {
        speaker: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        time: Option<String>,
        content: String,
    },
    /// Adjacent bullet lines collapsed into one list.
    BulletList { items: Vec<String> },
    /// Any line nothing else claimed.
    Paragraph { content: String },
}

impl Block {
    /// Convenience constructor for a plain heading.
    pub fn heading(title: impl Into<String>) -> Self {
        Block::Heading {
            title: title.into(),
            detail: None,
        }
    }

    /// Convenience constructor for a paragraph.
    pub fn paragraph(content: impl Into<String>) -> Self {
        Block::Paragraph {
            content: content.into(),
        }
    }
}
