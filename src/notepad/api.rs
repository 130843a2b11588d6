//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point for
//! every notepad operation, whichever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the session (pages, surfaces, persistence) so commands borrow it explicitly
//! - **Dispatches** to the appropriate command function
//! - **Holds UI-session state** that is not part of the notepad: the pending rename and the
//!   periodic autosave timer
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Terminal I/O**: No stdout, stderr or prompts; questions go through [`Confirm`]
//!
//! ## Generic Over Backends
//!
//! `NotepadApi<B: StorageBackend, H: SurfaceHost>`:
//! - CLI: `NotepadApi<FsBackend, MemorySurfaces>`
//! - Tests: `NotepadApi<MemBackend, MemorySurfaces>`

use crate::autosave::{AutosaveTimer, DEFAULT_INTERVAL_SECS};
use crate::commands::{self, Session};
use crate::config::{on_off, NotepadConfig};
use crate::editor::{EditorBinding, FormatCommand, SurfaceHost};
use crate::error::{NotepadError, Result};
use crate::model::PageId;
use crate::page_store::PageStore;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::ExportFormat;
pub use crate::commands::{
    AlwaysConfirm, CmdMessage, CmdResult, Confirm, MessageLevel, NeverConfirm, PageSummary,
};

/// The main API facade for notepad operations.
pub struct NotepadApi<B: StorageBackend, H: SurfaceHost> {
    session: Session<B, H>,
    autosave: AutosaveTimer,
    pending_rename: Option<PageId>,
}

impl<B: StorageBackend, H: SurfaceHost> NotepadApi<B, H> {
    /// A fresh notepad with page 1 bound and current. Call [`NotepadApi::load`] to pick up
    /// saved notes.
    pub fn new(backend: B, host: H) -> Self {
        Self {
            session: Session::new(backend, host),
            autosave: AutosaveTimer::new(DEFAULT_INTERVAL_SECS, Utc::now()),
            pending_rename: None,
        }
    }

    pub fn with_config(mut self, config: &NotepadConfig) -> Self {
        self.session.pages.set_auto_save(config.auto_save);
        self.autosave = AutosaveTimer::new(config.autosave_interval_secs, Utc::now());
        self
    }

    pub fn load(&mut self) -> Result<CmdResult> {
        self.pending_rename = None;
        commands::load::run(&mut self.session)
    }

    pub fn create_page(&mut self) -> Result<CmdResult> {
        commands::create::run(&mut self.session)
    }

    pub fn switch_to(&mut self, id: PageId) -> Result<CmdResult> {
        commands::switch::run(&mut self.session, id)
    }

    pub fn delete_page<C: Confirm + ?Sized>(
        &mut self,
        id: PageId,
        confirm: &mut C,
    ) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.session, id, confirm)?;
        self.drop_stale_rename();
        Ok(result)
    }

    /// Opens a rename for `id`. A rename already open for another page is dropped.
    pub fn begin_rename(&mut self, id: PageId) -> Result<()> {
        if !self.session.pages.contains(id) {
            return Err(NotepadError::UnknownPage(id));
        }
        self.pending_rename = Some(id);
        Ok(())
    }

    /// Commits the open rename. Commits after the first, or without an open rename, do
    /// nothing and return `None`; an input that loses focus and gets Enter both commit.
    pub fn commit_rename(&mut self, name: &str) -> Result<Option<CmdResult>> {
        let Some(id) = self.pending_rename.take() else {
            debug!("no rename pending");
            return Ok(None);
        };
        commands::rename::run(&mut self.session, id, name).map(Some)
    }

    pub fn cancel_rename(&mut self) {
        self.pending_rename = None;
    }

    pub fn pending_rename(&self) -> Option<PageId> {
        self.pending_rename
    }

    fn drop_stale_rename(&mut self) {
        if let Some(id) = self.pending_rename {
            if !self.session.pages.contains(id) {
                self.pending_rename = None;
            }
        }
    }

    pub fn rename_page(&mut self, id: PageId, name: &str) -> Result<CmdResult> {
        self.begin_rename(id)?;
        self.commit_rename(name)?
            .ok_or_else(|| NotepadError::Api("rename was not committed".to_string()))
    }

    pub fn clear_page<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> Result<CmdResult> {
        commands::clear::run(&mut self.session, confirm)
    }

    /// Called by the UI whenever the surface of `id` reports a content change.
    pub fn surface_edited(&mut self, id: PageId) -> Result<CmdResult> {
        commands::edit::surface_edited(&mut self.session, id)
    }

    pub fn write_page(&mut self, id: PageId, content: &str) -> Result<CmdResult> {
        commands::edit::write(&mut self.session, id, content)
    }

    pub fn format(&mut self, command: &FormatCommand) -> Result<CmdResult> {
        commands::format::run(&mut self.session, command)
    }

    pub fn focus(&mut self, id: PageId) {
        self.session.editors.focus(id);
    }

    pub fn save(&mut self, now: DateTime<Utc>) -> Result<CmdResult> {
        commands::save::run(&mut self.session, now)
    }

    /// Drives the periodic autosave. Returns `None` when autosave is off or the interval
    /// has not yet elapsed. A failed periodic save is reported in the result.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<Option<CmdResult>> {
        if !self.session.pages.auto_save() || !self.autosave.fire_if_due(now) {
            return Ok(None);
        }
        match commands::save::run(&mut self.session, now) {
            Ok(result) => Ok(Some(result)),
            Err(e @ NotepadError::Persistence(_)) => {
                warn!(error = %e, "periodic autosave failed");
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e.to_string()));
                Ok(Some(result))
            }
            Err(e) => Err(e),
        }
    }

    pub fn set_auto_save(&mut self, on: bool) -> CmdResult {
        self.session.pages.set_auto_save(on);
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!("Autosave {}", on_off(on))));
        result
    }

    pub fn auto_save(&self) -> bool {
        self.session.pages.auto_save()
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.session)
    }

    pub fn export<W: Write>(
        &self,
        format: ExportFormat,
        writer: W,
        now: DateTime<Utc>,
    ) -> Result<CmdResult> {
        commands::export::run(&self.session, format, writer, now)
    }

    pub fn export_text(&self) -> String {
        commands::export::render_text(&self.session)
    }

    pub fn export_html(&self, now: DateTime<Utc>) -> String {
        commands::export::render_html(&self.session, now)
    }

    pub fn export_archive<W: Write>(&self, writer: W, now: DateTime<Utc>) -> Result<()> {
        commands::export::write_archive(
            writer,
            &self.export_text(),
            &self.export_html(now),
            now,
        )
    }

    pub fn reset<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> Result<CmdResult> {
        let result = commands::reset::run(&mut self.session, confirm)?;
        self.drop_stale_rename();
        Ok(result)
    }

    pub fn config(&self, dir: &Path, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(dir, action)
    }

    pub fn pages(&self) -> &PageStore {
        &self.session.pages
    }

    pub fn editors(&self) -> &EditorBinding<H> {
        &self.session.editors
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.session.editors.host_mut()
    }

    pub fn backend(&self) -> &B {
        self.session.persistence.backend()
    }
}
