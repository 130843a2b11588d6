//! # Persistence Adapter
//!
//! Two independent entries, each overwritten whole on every save:
//!
//! - [`PAGES_KEY`]: the [`SavedState`] as JSON,
//!   `{"pages": {"<id>": {"id", "name", "content"}}, "totalPages", "currentPage"}`
//! - [`SAVED_AT_KEY`]: an RFC 3339 timestamp of the save
//!
//! The adapter only reads and writes the backend. It never touches live pages: `load`
//! hands the decoded snapshot back and the load command reconciles it.

use crate::error::{NotepadError, Result};
use crate::model::SavedState;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub const PAGES_KEY: &str = "notepad.pages";
pub const SAVED_AT_KEY: &str = "notepad.saved_at";

pub struct Persistence<B: StorageBackend> {
    backend: B,
}

fn backend_error(err: NotepadError) -> NotepadError {
    match err {
        NotepadError::Persistence(_) => err,
        other => NotepadError::Persistence(other.to_string()),
    }
}

impl<B: StorageBackend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Writes the full state, then the timestamp.
    pub fn save(&self, state: &SavedState, now: DateTime<Utc>) -> Result<()> {
        let json = serde_json::to_string(state)
            .map_err(|e| NotepadError::Persistence(format!("cannot encode pages: {}", e)))?;
        self.backend.set(PAGES_KEY, &json).map_err(backend_error)?;
        self.backend
            .set(SAVED_AT_KEY, &now.to_rfc3339())
            .map_err(backend_error)?;
        Ok(())
    }

    /// Reads the saved state. `Ok(None)` when nothing was ever saved.
    pub fn load(&self) -> Result<Option<SavedState>> {
        let Some(raw) = self.backend.get(PAGES_KEY).map_err(backend_error)? else {
            return Ok(None);
        };

        let state: SavedState = serde_json::from_str(&raw)
            .map_err(|e| NotepadError::CorruptState(e.to_string()))?;

        if state.pages.is_empty() {
            return Err(NotepadError::CorruptState("no pages".to_string()));
        }
        if state.pages.values().any(|p| p.id.get() == 0) {
            return Err(NotepadError::CorruptState("page id 0".to_string()));
        }
        Ok(Some(state))
    }

    /// Time of the last save, if one was recorded and is readable.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        let raw = self.backend.get(SAVED_AT_KEY).ok()??;
        DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Forgets everything that was saved.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(PAGES_KEY).map_err(backend_error)?;
        self.backend.remove(SAVED_AT_KEY).map_err(backend_error)?;
        Ok(())
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location(PAGES_KEY)
    }
}
