//! Session runner — drives the full recognizer → improve → normalize → save
//! loop.
//!
//! [`SessionRunner`] owns the [`SharedState`] and responds to
//! [`RecognizerEvent`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Session flow
//!
//! ```text
//! RecognizerEvent::Started
//!   └─▶ clear transcript, set state = Recording
//!
//! RecognizerEvent::Partial(text)
//!   └─▶ update live preview
//!
//! RecognizerEvent::Final(text)
//!   └─▶ append line to raw transcript, clear preview
//!
//! RecognizerEvent::Stopped
//!   └─▶ [improve.enabled] improver.improve (async)        [Improving]
//!         ├─ Ok  → structurer.normalize → store.save      [Ready]
//!         └─ Err → warn + normalize raw → store.save      [Ready]
//! ```
//!
//! An improvement failure never loses the recording: the runner falls back to
//! the raw transcript, exactly as if improvement were disabled.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::improve::TranscriptImprover;
use crate::store::{RecordingMeta, RecordingStore, StoredRecording};
use crate::structure::{Block, TranscriptStructurer};

use super::state::{SessionState, SharedState};

// ---------------------------------------------------------------------------
// RecognizerEvent
// ---------------------------------------------------------------------------

/// Events emitted by the speech recognizer collaborator.
///
/// The recognizer itself lives in the host application; this crate only
/// consumes its event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerEvent {
    /// A new recognition session has begun.
    Started,
    /// An in-flight, still-changing segment.
    Partial(String),
    /// A finalised segment; one line of the raw transcript.
    Final(String),
    /// The session has ended; no further segments will arrive.
    Stopped,
}

// ---------------------------------------------------------------------------
// SessionRunner
// ---------------------------------------------------------------------------

/// Drives a complete note-taking session.
///
/// Create with [`SessionRunner::new`], then call [`run`](Self::run) inside a
/// tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use voice_notes::config::AppConfig;
/// use voice_notes::session::{new_shared_state, SessionRunner};
/// use voice_notes::store::MemoryStore;
/// use voice_notes::structure::TranscriptStructurer;
///
/// # async fn example() {
/// # use voice_notes::improve::TranscriptImprover;
/// # fn make_improver() -> Arc<dyn TranscriptImprover> { unimplemented!() }
/// let config = AppConfig::default();
/// let state = new_shared_state(config.clone());
/// let structurer = TranscriptStructurer::new(config.markers.clone());
///
/// let (event_tx, event_rx) = tokio::sync::mpsc::channel(64);
/// let runner = SessionRunner::new(
///     state,
///     structurer,
///     make_improver(),
///     Arc::new(MemoryStore::new()),
/// );
/// runner.run(event_rx).await;
/// # }
/// ```
pub struct SessionRunner {
    state: SharedState,
    structurer: TranscriptStructurer,
    improver: Arc<dyn TranscriptImprover>,
    store: Arc<dyn RecordingStore>,
    started_at: Option<Instant>,
}

impl SessionRunner {
    /// Create a new runner.
    ///
    /// # Arguments
    ///
    /// * `state`      — shared session state (also read by the UI).
    /// * `structurer` — the normalization engine, built over the config's
    ///   marker table.
    /// * `improver`   — AI improvement backend (wrap in `FallbackImprover`
    ///   for transparent degradation).
    /// * `store`      — recording persistence.
    pub fn new(
        state: SharedState,
        structurer: TranscriptStructurer,
        improver: Arc<dyn TranscriptImprover>,
        store: Arc<dyn RecordingStore>,
    ) -> Self {
        Self {
            state,
            structurer,
            improver,
            store,
            started_at: None,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the session loop until `event_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`. It never returns while the channel is open.
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<RecognizerEvent>) {
        while let Some(event) = event_rx.recv().await {
            match event {
                RecognizerEvent::Started => self.handle_started(),
                RecognizerEvent::Partial(text) => self.handle_partial(text),
                RecognizerEvent::Final(text) => self.handle_final(text),
                RecognizerEvent::Stopped => self.handle_stopped().await,
            }
        }

        log::info!("session: recognizer channel closed, runner shutting down");
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    /// Handle session start: clear the transcript and enter Recording.
    fn handle_started(&mut self) {
        log::debug!("session: Started → Recording");
        self.started_at = Some(Instant::now());

        let mut st = self.state.lock().unwrap();
        st.session = SessionState::Recording;
        st.raw_transcript.clear();
        st.partial = None;
        st.error_message = None;
    }

    /// Update the live preview with an in-flight segment.
    fn handle_partial(&self, text: String) {
        let mut st = self.state.lock().unwrap();
        st.partial = Some(text);
    }

    /// Append a finalised segment as one transcript line.
    fn handle_final(&self, text: String) {
        let mut st = self.state.lock().unwrap();
        if !st.raw_transcript.is_empty() {
            st.raw_transcript.push('\n');
        }
        st.raw_transcript.push_str(&text);
        st.partial = None;
    }

    /// Handle session end: improve → normalize → save.
    async fn handle_stopped(&mut self) {
        log::debug!("session: Stopped → finalising");

        let duration_secs = self
            .started_at
            .take()
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);

        // ── 1. Take the raw transcript ───────────────────────────────────
        let (raw, improve_enabled) = {
            let mut st = self.state.lock().unwrap();
            st.partial = None;
            (st.raw_transcript.clone(), st.config.improve.enabled)
        };

        if raw.trim().is_empty() {
            log::warn!("session: transcript was empty on stop");
            self.set_error("No speech captured".to_string());
            return;
        }

        // ── 2. AI improvement (optional, never fatal) ────────────────────
        let improved = if improve_enabled {
            self.set_session(SessionState::Improving);
            match self.improver.improve(&raw).await {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("session: improvement failed ({e}), keeping raw transcript");
                    raw.clone()
                }
            }
        } else {
            log::debug!("session: improvement disabled — skipping");
            raw.clone()
        };

        // ── 3. Normalize and persist ─────────────────────────────────────
        let normalized = self.structurer.normalize(&improved);
        let blocks = self.structurer.parse_blocks(&normalized);

        let now = Utc::now();
        let id = now.format("%Y%m%d-%H%M%S").to_string();
        let recording = StoredRecording {
            meta: RecordingMeta {
                id: id.clone(),
                title: derive_title(&blocks, &id),
                created_at: now.to_rfc3339(),
                duration_secs,
            },
            raw_transcript: raw,
            normalized_text: normalized,
        };

        if let Err(e) = self.store.save(&recording) {
            self.set_error(format!("Failed to save recording: {e}"));
            return;
        }

        log::info!("session: saved recording {id} ({duration_secs}s)");

        // ── 4. Finalise state ────────────────────────────────────────────
        let mut st = self.state.lock().unwrap();
        st.session = SessionState::Ready;
        st.last_recording_id = Some(id);
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn set_session(&self, session: SessionState) {
        let mut st = self.state.lock().unwrap();
        st.session = session;
    }

    fn set_error(&self, message: String) {
        let mut st = self.state.lock().unwrap();
        st.session = SessionState::Error;
        st.error_message = Some(message.clone());
        log::error!("session error: {message}");
    }
}

/// Display title for a recording: first heading block, else a default built
/// from the id.
fn derive_title(blocks: &[Block], id: &str) -> String {
    blocks
        .iter()
        .find_map(|b| match b {
            Block::Heading { title, .. } => Some(title.clone()),
            _ => None,
        })
        .unwrap_or_else(|| format!("Kayıt {id}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
