//! # Storage Layer
//!
//! The notepad persists itself into a flat key-value store holding strings, the same shape
//! as a browser's local storage. [`StorageBackend`] is that store; [`crate::persistence`]
//! decides what goes under which key.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: one file per key under a data directory
//!   - Writes go to a temporary file first and are renamed into place, so a key is
//!     either fully old or fully new
//!
//! - [`memory::MemBackend`]: in-memory map for tests and embedding
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! For `FsBackend`:
//! ```text
//! <data dir>/
//! ├── notepad.pages       # Saved pages, counters and current page (JSON)
//! ├── notepad.saved_at    # Timestamp of the last save (RFC 3339)
//! └── config.json         # Configuration (see config.rs)
//! ```

use crate::error::Result;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for raw key-value I/O.
///
/// All methods take `&self`; implementations that need mutation use interior mutability.
pub trait StorageBackend {
    /// Read the value stored under `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic: a failed write leaves the previous value intact.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Where the value for `key` lives. A real path for `FsBackend`, a virtual one otherwise.
    fn location(&self, key: &str) -> PathBuf;
}
