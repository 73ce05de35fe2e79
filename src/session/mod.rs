//! Session module — wires the recognizer event stream to the structuring
//! engine, the improvement service and the recording store, and exposes the
//! shared state that the UI reads every frame.
//!
//! # Architecture
//!
//! ```text
//! RecognizerEvent (mpsc)
//!        │
//!        ▼
//! SessionRunner::run()  ← async tokio task
//!        │
//!        ├─ Started         → clear transcript, set Recording
//!        ├─ Partial(text)   → update live preview
//!        ├─ Final(text)     → append transcript line
//!        └─ Stopped
//!              │
//!              ├─ [improve.enabled] TranscriptImprover::improve → Improving
//!              ├─ TranscriptStructurer::normalize
//!              └─ RecordingStore::save                          → Ready
//!
//! SharedState (Arc<Mutex<NoteState>>) ←─── read by the UI each frame
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use voice_notes::config::AppConfig;
//! use voice_notes::session::{new_shared_state, RecognizerEvent, SessionRunner};
//! use voice_notes::store::MemoryStore;
//! use voice_notes::structure::TranscriptStructurer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let state = new_shared_state(config.clone());
//!     let structurer = TranscriptStructurer::new(config.markers.clone());
//!
//!     // (improver constructed from config)
//!     # use voice_notes::improve::TranscriptImprover;
//!     # fn make_improver() -> Arc<dyn TranscriptImprover> { unimplemented!() }
//!
//!     let (event_tx, event_rx) = mpsc::channel(64);
//!     let runner = SessionRunner::new(
//!         state.clone(),
//!         structurer,
//!         make_improver(),
//!         Arc::new(MemoryStore::new()),
//!     );
//!
//!     tokio::spawn(async move { runner.run(event_rx).await });
//!
//!     // event_tx is handed to the recognizer
//!     # let _ = event_tx.send(RecognizerEvent::Started).await;
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{RecognizerEvent, SessionRunner};
pub use state::{new_shared_state, NoteState, SessionState, SharedState};
