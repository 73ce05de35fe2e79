//! Fallback improver — wraps any [`TranscriptImprover`] and returns the raw
//! transcript on error.
//!
//! When the underlying call fails for any reason (`Request`, `Timeout`,
//! `Parse`, `EmptyResponse`) [`FallbackImprover`] silently hands back the
//! original raw text instead of propagating the error. The recording is
//! never lost just because the improvement service is unreachable.

use async_trait::async_trait;

use crate::improve::improver::{ImproveError, TranscriptImprover};

// ---------------------------------------------------------------------------
// FallbackImprover
// ---------------------------------------------------------------------------

/// A transparent wrapper around any [`TranscriptImprover`] that never returns
/// an error — on failure it returns `raw` unchanged.
pub struct FallbackImprover<I: TranscriptImprover> {
    inner: I,
}

impl<I: TranscriptImprover> FallbackImprover<I> {
    /// Wrap `inner` with fallback behaviour.
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Return a reference to the wrapped improver.
    pub fn inner(&self) -> &I {
        &self.inner
    }
}

#[async_trait]
impl<I: TranscriptImprover + Send + Sync> TranscriptImprover for FallbackImprover<I> {
    /// Attempt improvement; return `raw` unchanged if any error occurs.
    ///
    /// This implementation **never** returns `Err(_)`.
    async fn improve(&self, raw: &str) -> Result<String, ImproveError> {
        match self.inner.improve(raw).await {
            Ok(improved) => Ok(improved),
            Err(_err) => {
                log::warn!(
                    "improvement failed — keeping raw transcript (len={})",
                    raw.len()
                );
                Ok(raw.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
