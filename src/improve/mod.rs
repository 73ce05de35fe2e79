//! AI transcript-improvement seam.
//!
//! This module provides:
//! * [`TranscriptImprover`] — async trait implemented by improvement backends
//!   (the HTTP client, its keys and failover live in the host application).
//! * [`FallbackImprover`] — wraps any improver; returns raw text on failure.
//! * [`ImproveError`] — error variants for improvement operations.

pub mod fallback;
pub mod improver;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use fallback::FallbackImprover;
pub use improver::{ImproveError, TranscriptImprover};
