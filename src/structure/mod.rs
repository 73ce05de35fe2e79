//! Transcript structuring & normalization engine.
//!
//! Two producers feed this crate text: the live recognizer (canonical
//! timestamps, modern numbered speaker labels) and the AI improvement
//! service (either dialect, either timestamp notation, markdown emphasis,
//! structural headings). This module reconciles both into one canonical,
//! speaker-segmented document model:
//!
//! ```text
//! raw ──normalize_timestamps──▶ ──compress_speaker_runs──▶ normalized text
//!
//! normalized text ──parse_blocks (+ strip_markdown)──▶ Vec<Block>
//! normalized text ──count_speakers──▶ usize
//! ```
//!
//! Everything here is synchronous, side-effect-free and total: no I/O, no
//! shared mutable state, no panics — unrecognized lines degrade to
//! [`Block::Paragraph`]. Normalized text is what gets persisted; `Block`s
//! are always recomputed, never stored.
//!
//! # Quick start
//!
//! ```
//! use voice_notes::structure::TranscriptStructurer;
//!
//! let engine = TranscriptStructurer::default();
//! let raw = "👤 Konuşmacı 1 [0.05]: Merhaba";
//! let normalized = engine.normalize(raw);
//! assert_eq!(normalized, "👤 Konuşmacı 1 [00:05]: Merhaba");
//!
//! let blocks = engine.parse_blocks(&normalized);
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(engine.speaker_count(&normalized), 1);
//! ```

pub mod block;
pub mod compress;
pub mod markdown;
pub mod parser;
pub mod speaker;
pub mod timestamp;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use block::Block;
pub use compress::{compress_speaker_runs, ScanState};
pub use markdown::strip_markdown;
pub use parser::parse_blocks;
pub use speaker::{
    canonical_label, count_speakers, legacy_letter_number, parse_speaker_header,
    unify_speaker_label, SpeakerHeader,
};
pub use timestamp::normalize_timestamps;

use crate::config::MarkerConfig;

// ---------------------------------------------------------------------------
// TranscriptStructurer
// ---------------------------------------------------------------------------

/// Facade bundling the whole pipeline behind one marker table.
///
/// Cheap to construct, `Send + Sync`, and safe to call from any number of
/// threads at once (a live preview render and a document export may overlap).
#[derive(Debug, Clone, Default)]
pub struct TranscriptStructurer {
    markers: MarkerConfig,
}

impl TranscriptStructurer {
    /// Build a structurer over the given marker table.
    pub fn new(markers: MarkerConfig) -> Self {
        Self { markers }
    }

    /// The marker table in use.
    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    /// Canonicalise timestamps, then compress speaker runs.
    ///
    /// Idempotent: `normalize(normalize(x)) == normalize(x)`.
    pub fn normalize(&self, raw: &str) -> String {
        compress_speaker_runs(&normalize_timestamps(raw), &self.markers)
    }

    /// Classify normalized text into an ordered block sequence.
    pub fn parse_blocks(&self, normalized: &str) -> Vec<Block> {
        parse_blocks(normalized, &self.markers)
    }

    /// Distinct-speaker count over normalized text (always ≥ 1).
    pub fn speaker_count(&self, normalized: &str) -> usize {
        count_speakers(normalized)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
