//! Recording persistence.
//!
//! A recording is saved as normalized text plus the raw transcript it came
//! from, under a small metadata header. Block sequences are never persisted:
//! they are recomputed from normalized text on every render, so the document
//! model can evolve without migrating stored data.
//!
//! [`RecordingStore`] is the seam; [`MemoryStore`] is the in-process
//! implementation used by the session runner and the tests. A disk-backed
//! store lives in the host application.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors surfaced by a recording store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure (disk-backed stores).
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested recording does not exist.
    #[error("recording not found: {0}")]
    NotFound(String),

    /// The stored payload could not be decoded.
    #[error("failed to decode stored recording: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// Metadata header for a stored recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMeta {
    /// Stable identifier, unique within a store.
    pub id: String,
    /// Display title (first heading, or a timestamp-derived default).
    pub title: String,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Recording length in seconds.
    pub duration_secs: u64,
}

/// A persisted recording: metadata, the raw transcript as the recognizer and
/// improver produced it, and the normalized text derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecording {
    pub meta: RecordingMeta,
    pub raw_transcript: String,
    pub normalized_text: String,
}

// ---------------------------------------------------------------------------
// RecordingStore trait
// ---------------------------------------------------------------------------

/// Persistence seam for recordings.
///
/// Implementors must be `Send + Sync`; the session runner holds the store as
/// an `Arc<dyn RecordingStore>` and saves from its event loop.
pub trait RecordingStore: Send + Sync {
    /// Insert or replace a recording keyed by `meta.id`.
    fn save(&self, recording: &StoredRecording) -> Result<(), StoreError>;

    /// Load a recording by id.
    fn load(&self, id: &str) -> Result<StoredRecording, StoreError>;

    /// List metadata for all recordings, newest first.
    fn list(&self) -> Result<Vec<RecordingMeta>, StoreError>;
}

// Compile-time assertion: Box<dyn RecordingStore> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn RecordingStore>) {}
};

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recordings: Mutex<HashMap<String, StoredRecording>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored recordings.
    pub fn len(&self) -> usize {
        self.recordings.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordingStore for MemoryStore {
    fn save(&self, recording: &StoredRecording) -> Result<(), StoreError> {
        let mut map = self
            .recordings
            .lock()
            .map_err(|e| StoreError::Decode(format!("store lock poisoned: {e}")))?;
        map.insert(recording.meta.id.clone(), recording.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<StoredRecording, StoreError> {
        let map = self
            .recordings
            .lock()
            .map_err(|e| StoreError::Decode(format!("store lock poisoned: {e}")))?;
        map.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<RecordingMeta>, StoreError> {
        let map = self
            .recordings
            .lock()
            .map_err(|e| StoreError::Decode(format!("store lock poisoned: {e}")))?;
        let mut metas: Vec<RecordingMeta> = map.values().map(|r| r.meta.clone()).collect();
        // RFC 3339 sorts lexicographically; newest first.
        metas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(metas)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(id: &str, created_at: &str) -> StoredRecording {
        StoredRecording {
            meta: RecordingMeta {
                id: id.to_string(),
                title: format!("Kayıt {id}"),
                created_at: created_at.to_string(),
                duration_secs: 42,
            },
            raw_transcript: "👤 Konuşmacı 1 [0.01]: Merhaba".to_string(),
            normalized_text: "👤 Konuşmacı 1 [00:01]: Merhaba".to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let rec = recording("r1", "2025-03-01T10:00:00Z");
        store.save(&rec).unwrap();
        assert_eq!(store.load("r1").unwrap(), rec);
    }

    #[test]
    fn save_replaces_existing_id() {
        let store = MemoryStore::new();
        store.save(&recording("r1", "2025-03-01T10:00:00Z")).unwrap();
        let mut updated = recording("r1", "2025-03-01T10:00:00Z");
        updated.normalized_text = "değişti".to_string();
        store.save(&updated).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("r1").unwrap().normalized_text, "değişti");
    }

    #[test]
    fn load_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.load("yok").unwrap_err(),
            StoreError::NotFound(id) if id == "yok"
        ));
    }

    #[test]
    fn list_is_newest_first() {
        let store = MemoryStore::new();
        store.save(&recording("eski", "2025-03-01T10:00:00Z")).unwrap();
        store.save(&recording("yeni", "2025-03-02T09:30:00Z")).unwrap();
        store.save(&recording("orta", "2025-03-01T18:45:00Z")).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["yeni", "orta", "eski"]);
    }

    #[test]
    fn stored_recording_serde_round_trips() {
        let rec = recording("r1", "2025-03-01T10:00:00Z");
        let json = serde_json::to_string(&rec).unwrap();
        let back: StoredRecording = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn memory_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryStore>();
    }
}
