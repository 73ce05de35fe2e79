//! Session state machine and shared application state.
//!
//! [`SessionState`] drives the runner's state machine. The UI reads it via
//! [`SharedState`] to render the appropriate view.
//!
//! [`NoteState`] is the single source of truth for everything the UI needs:
//! current session phase, accumulated raw transcript, live partial preview,
//! config snapshot, and any error message.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<NoteState>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// States of a note-taking session.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──recognizer Started──▶ Recording
///      ──recognizer Stopped──▶ Improving   (improve.enabled)
///                              ──improve + normalize + save──▶ Ready
///      ──recognizer Stopped──▶ Ready       (improve disabled)
/// any state ──error──▶ Error
/// Error / Ready ──next Started──▶ Recording
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Waiting for the recognizer to start a session.
    Idle,

    /// The recognizer is active; partial and final segments are arriving.
    Recording,

    /// Recognition is complete; the AI improvement call is in flight.
    Improving,

    /// The normalized recording has been saved and can be displayed.
    Ready,

    /// A recoverable error occurred. The session returns to `Recording` on
    /// the next `Started` event.
    Error,
}

impl SessionState {
    /// Returns `true` while the session is actively capturing or processing.
    ///
    /// The UI uses this to disable the record button while busy.
    ///
    /// ```
    /// use voice_notes::session::SessionState;
    ///
    /// assert!(!SessionState::Idle.is_busy());
    /// assert!(SessionState::Recording.is_busy());
    /// assert!(SessionState::Improving.is_busy());
    /// assert!(!SessionState::Ready.is_busy());
    /// assert!(!SessionState::Error.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Recording | SessionState::Improving)
    }

    /// A short human-readable label suitable for display in the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Recording => "Recording",
            SessionState::Improving => "Improving",
            SessionState::Ready => "Ready",
            SessionState::Error => "Error",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

// ---------------------------------------------------------------------------
// NoteState
// ---------------------------------------------------------------------------

/// Shared session state — the single source of truth for the UI.
///
/// Held behind [`SharedState`] (`Arc<Mutex<NoteState>>`). The session runner
/// mutates it; the UI loop reads it each frame.
pub struct NoteState {
    /// Current phase of the note-taking session.
    pub session: SessionState,

    /// Final recognizer segments accumulated so far, one line each.
    pub raw_transcript: String,

    /// The in-flight partial segment, shown live under the transcript.
    ///
    /// Cleared when the segment is finalised or the session stops.
    pub partial: Option<String>,

    /// Id of the most-recently saved recording.
    ///
    /// `None` until at least one session has completed.
    pub last_recording_id: Option<String>,

    /// Current application configuration.
    ///
    /// The runner reads `improve.enabled` to decide whether to call the
    /// improvement service.
    pub config: AppConfig,

    /// Error message to display when `session == SessionState::Error`.
    pub error_message: Option<String>,
}

impl NoteState {
    /// Create a new `NoteState` with sensible defaults.
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: SessionState::Idle,
            raw_transcript: String::new(),
            partial: None,
            last_recording_id: None,
            config,
            error_message: None,
        }
    }
}

impl Default for NoteState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`NoteState`].
///
/// Cheap to clone (`Arc` clone). Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<NoteState>>;

/// Construct a new [`SharedState`] wrapping a default [`NoteState`].
pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(NoteState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
