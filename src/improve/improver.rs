//! Core `TranscriptImprover` trait and its error type.
//!
//! The AI improvement service (punctuation, casing, structural headings) is
//! an external collaborator reached over the network. This crate only defines
//! the seam: implementors live in the host application, which also owns API
//! keys, key rotation and failover. Whatever comes back — either speaker
//! dialect, either timestamp notation, markdown emphasis — is handed to the
//! structuring engine for reconciliation.

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ImproveError
// ---------------------------------------------------------------------------

/// Errors an improvement backend can surface.
#[derive(Debug, Clone, Error)]
pub enum ImproveError {
    /// Transport or connection error.
    #[error("improvement request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("improvement request timed out")]
    Timeout,

    /// The response could not be parsed as expected.
    #[error("failed to parse improvement response: {0}")]
    Parse(String),

    /// The service returned no usable text.
    #[error("improvement service returned an empty response")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// TranscriptImprover trait
// ---------------------------------------------------------------------------

/// Async seam to the AI transcript-improvement collaborator.
///
/// Implementors must be `Send + Sync` so they can be shared as an
/// `Arc<dyn TranscriptImprover>` between the session runner and the UI.
///
/// `raw` is the accumulated raw transcript; the returned string replaces it
/// wholesale (the caller normalizes afterwards).
#[async_trait]
pub trait TranscriptImprover: Send + Sync {
    async fn improve(&self, raw: &str) -> Result<String, ImproveError>;
}

// Compile-time assertion: Box<dyn TranscriptImprover> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn TranscriptImprover>) {}
};

// ---------------------------------------------------------------------------
// MockImprover  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response.
#[cfg(test)]
pub struct MockImprover {
    response: Result<String, ImproveError>,
}

#[cfg(test)]
impl MockImprover {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: ImproveError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl TranscriptImprover for MockImprover {
    async fn improve(&self, _raw: &str) -> Result<String, ImproveError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
