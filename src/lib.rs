//! Voice Notes — transcript structuring & normalization engine.
//!
//! A Turkish voice-recording app produces transcripts from two sources: the
//! live speech recognizer and an AI improvement service. Their outputs
//! disagree on timestamp notation, speaker-label dialect and markdown
//! emphasis. This crate reconciles both into one canonical, speaker-segmented
//! document model, persists the result and renders it for export.
//!
//! # Modules
//!
//! | Module        | Responsibility                                           |
//! |---------------|----------------------------------------------------------|
//! | [`config`]    | Settings file, marker tables, platform paths             |
//! | [`structure`] | Timestamp/speaker normalization, block parsing, counting |
//! | [`improve`]   | AI improvement seam with transparent fallback            |
//! | [`session`]   | Recognizer event loop, state machine, shared state       |
//! | [`store`]     | Recording persistence                                    |
//! | [`export`]    | Markdown / plain-text / JSON rendering                   |
//!
//! The structuring engine ([`structure::TranscriptStructurer`]) is pure and
//! synchronous; everything async (improvement calls, the session loop) lives
//! behind trait seams so the engine can be tested without a network or a
//! microphone.

pub mod config;
pub mod export;
pub mod improve;
pub mod session;
pub mod store;
pub mod structure;
