//! Load and reconciliation.
//!
//! Loading replaces the live notepad with the saved one, but not wholesale:
//!
//! 1. Every surface except page 1's is torn down.
//! 2. Page 1's surface is reused in place and gets the saved page 1 content; every other
//!    saved page gets a new surface.
//! 3. If the save has no page 1, the kept surface goes too.
//! 4. The page count becomes the larger of the saved count and the highest saved id.
//! 5. The saved current page is restored if it exists, otherwise the lowest id.
//!
//! Saved data that cannot be read is reported and ignored; the live notepad is left as
//! it was.

use crate::commands::{CmdMessage, CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::model::PageId;
use crate::page_store::PageStore;
use crate::store::StorageBackend;
use tracing::{debug, info, warn};

pub fn run<B: StorageBackend, H: SurfaceHost>(session: &mut Session<B, H>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let loaded = session
        .persistence
        .load()
        .and_then(|saved| match saved {
            Some(saved) => PageStore::from_saved(saved, session.pages.auto_save()).map(Some),
            None => Ok(None),
        });

    let store = match loaded {
        Ok(Some(store)) => store,
        Ok(None) => {
            debug!("no saved notes");
            return Ok(result.with_char_count(session.editors.char_count()));
        }
        Err(e) => {
            warn!(error = %e, "ignoring saved notes");
            result.add_message(CmdMessage::error(format!(
                "{}; starting from the current notes",
                e
            )));
            return Ok(result.with_char_count(session.editors.char_count()));
        }
    };

    let stale: Vec<PageId> = session
        .editors
        .bound_ids()
        .filter(|id| *id != PageId::FIRST)
        .collect();
    for id in stale {
        session.editors.unbind(id);
    }

    for page in store.pages() {
        session.editors.bind(page.id, &page.content);
    }
    if !store.contains(PageId::FIRST) {
        session.editors.unbind(PageId::FIRST);
    }

    session.pages = store;
    session.editors.activate(session.pages.current());

    result.saved_at = session.persistence.last_saved();
    match result.saved_at {
        Some(at) => info!(pages = session.pages.len(), saved_at = %at, "notes loaded"),
        None => info!(pages = session.pages.len(), "notes loaded"),
    }

    Ok(result
        .with_affected_pages(session.pages.pages().cloned().collect())
        .with_char_count(session.editors.char_count()))
}
