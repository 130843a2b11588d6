//! # Notepad Architecture
//!
//! Notepad is a **UI-agnostic multi-page rich-text notepad engine**. It owns the page
//! lifecycle (create, switch, rename, clear, delete), keeps the cached page content in step
//! with live editable surfaces, and persists the whole notepad to a key-value store. The
//! bundled CLI is one client; a browser adapter or a TUI would be others.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, cli/)                                  │
//! │  - Parses arguments, prompts, prints notifications          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session, the autosave timer, pending renames    │
//! │  - Returns structured Result<CmdResult> values              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Page lifecycle rules and invariants                      │
//! │  - Works on PageStore + EditorBinding + Persistence         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State & Storage (page_store.rs, editor/, persistence.rs,   │
//! │  store/)                                                    │
//! │  - PageStore: authoritative pages, cursor and counters      │
//! │  - EditorBinding: one live surface per page                 │
//! │  - Persistence over an abstract StorageBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the process.
//! Notifications travel back to the caller as [`commands::CmdMessage`] values inside each
//! [`commands::CmdResult`]; yes/no questions go through the injected [`commands::Confirm`]
//! capability; editable regions are reached through the [`editor::SurfaceHost`] trait.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): lifecycle rules, invariants, reconciliation.
//! 2. **State** (`page_store.rs`, `editor/`, `persistence.rs`): unit tests per module.
//! 3. **Storage** (`store/`): `MemBackend` in unit tests, `FsBackend` against temp dirs.
//! 4. **CLI** (`tests/`): end-to-end runs of the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`page_store`]: In-memory pages plus current page and counters
//! - [`autosave`]: Periodic autosave schedule
//! - [`editor`]: Surface host abstraction, binding and formatting commands
//! - [`persistence`]: Saved state layout over a storage backend
//! - [`store`]: Key-value storage backends
//! - [`model`]: Core data types (`PageId`, `Page`, `SavedState`)
//! - [`text`]: Plain-text extraction from rich-text markup
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod autosave;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod page_store;
pub mod persistence;
pub mod store;
pub mod text;
