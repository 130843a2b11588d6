use crate::config::NotepadConfig;
use crate::editor::{EditorBinding, SurfaceHost};
use crate::error::Result;
use crate::model::{Page, PageId, PageStatus};
use crate::page_store::PageStore;
use crate::persistence::Persistence;
use crate::store::StorageBackend;
use crate::text;
use chrono::{DateTime, Utc};
use tracing::warn;

pub mod clear;
pub mod config;
pub mod create;
pub mod delete;
pub mod edit;
pub mod export;
pub mod format;
pub mod load;
pub mod rename;
pub mod reset;
pub mod save;
pub mod status;
pub mod switch;

/// Everything a command works on: the pages, their surfaces, and where they are saved.
pub struct Session<B: StorageBackend, H: SurfaceHost> {
    pub pages: PageStore,
    pub editors: EditorBinding<H>,
    pub persistence: Persistence<B>,
}

impl<B: StorageBackend, H: SurfaceHost> Session<B, H> {
    /// A session holding page 1 with its surface bound and active.
    pub fn new(backend: B, host: H) -> Self {
        let pages = PageStore::new();
        let mut editors = EditorBinding::new(host);
        let first = pages.current_page();
        editors.bind(first.id, &first.content);
        editors.activate(first.id);
        Self {
            pages,
            editors,
            persistence: Persistence::new(backend),
        }
    }

    /// Copies the live content of every surface into the page store.
    pub(crate) fn sync_surfaces(&mut self) -> Result<()> {
        let ids: Vec<PageId> = self.editors.bound_ids().collect();
        for id in ids {
            if let Some(content) = self.editors.read(id) {
                self.pages.update_content(id, content)?;
            }
        }
        Ok(())
    }

    /// Syncs and writes the full state.
    pub(crate) fn persist(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.sync_surfaces()?;
        self.persistence.save(&self.pages.snapshot(), now)
    }

    /// Saves after a mutation that already happened. A failed write does not undo the
    /// mutation; it is logged and reported on `result`.
    pub(crate) fn persist_or_report(&mut self, result: &mut CmdResult) {
        let now = Utc::now();
        match self.persist(now) {
            Ok(()) => result.saved_at = Some(now),
            Err(e) => {
                warn!(error = %e, "save failed; changes kept in memory");
                result.add_message(CmdMessage::error(e.to_string()));
            }
        }
    }

    /// [`Session::persist_or_report`], only when autosave is on.
    pub(crate) fn autosave(&mut self, result: &mut CmdResult) {
        if self.pages.auto_save() {
            self.persist_or_report(result);
        }
    }

    pub(crate) fn summaries(&self) -> Vec<PageSummary> {
        self.pages
            .pages()
            .map(|page| {
                let content = self
                    .editors
                    .read(page.id)
                    .unwrap_or_else(|| page.content.clone());
                PageSummary {
                    id: page.id,
                    name: page.name.clone(),
                    status: self.pages.status(page.id).unwrap_or(PageStatus::Inactive),
                    chars: text::char_count(&content),
                }
            })
            .collect()
    }
}

/// Yes/no question put to the user before destructive operations.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Answers yes without asking (`--yes`).
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

/// Answers no without asking; for non-interactive runs.
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row of a page listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub id: PageId,
    pub name: String,
    pub status: PageStatus,
    pub chars: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_pages: Vec<Page>,
    pub listed_pages: Vec<PageSummary>,
    pub char_count: Option<usize>,
    pub saved_at: Option<DateTime<Utc>>,
    pub config: Option<NotepadConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pages(mut self, pages: Vec<Page>) -> Self {
        self.affected_pages = pages;
        self
    }

    pub fn with_listed_pages(mut self, pages: Vec<PageSummary>) -> Self {
        self.listed_pages = pages;
        self
    }

    pub fn with_char_count(mut self, count: usize) -> Self {
        self.char_count = Some(count);
        self
    }

    pub fn with_config(mut self, config: NotepadConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::editor::MemorySurfaces;
    use crate::store::memory::MemBackend;

    pub type MemSession = Session<MemBackend, MemorySurfaces>;

    pub fn session() -> MemSession {
        Session::new(MemBackend::new(), MemorySurfaces::new())
    }

    /// A session with pages `1..=count`, page `count` current.
    pub fn session_with_pages(count: u32) -> MemSession {
        let mut session = session();
        for _ in 1..count {
            super::create::run(&mut session).unwrap();
        }
        session
    }

    /// Every page has a bound surface and every bound surface has a page, and the active
    /// surface is the current page's.
    pub fn assert_bindings_consistent(session: &MemSession) {
        let pages: Vec<PageId> = session.pages.ids().collect();
        let bound: Vec<PageId> = session.editors.bound_ids().collect();
        assert_eq!(pages, bound, "pages and bound surfaces differ");
        assert_eq!(session.editors.host().len(), pages.len());
        assert_eq!(session.editors.active(), Some(session.pages.current()));
    }

    pub fn yes() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    pub fn no() -> impl FnMut(&str) -> bool {
        |_: &str| false
    }
}
