use crate::commands::{CmdMessage, CmdResult, Confirm, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::page_store::PageStore;
use crate::store::StorageBackend;
use tracing::info;

/// Discards every page and the saved notes, leaving the notepad as on first start.
/// The autosave setting survives.
pub fn run<B, H, C>(session: &mut Session<B, H>, confirm: &mut C) -> Result<CmdResult>
where
    B: StorageBackend,
    H: SurfaceHost,
    C: Confirm + ?Sized,
{
    if !confirm.confirm("Discard all pages and saved notes? This action cannot be undone.") {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Reset cancelled"));
        return Ok(result);
    }

    session.persistence.clear()?;
    session.editors.unbind_all();

    let mut pages = PageStore::new();
    pages.set_auto_save(session.pages.auto_save());
    let first = pages.current_page();
    session.editors.bind(first.id, &first.content);
    session.editors.activate(first.id);
    session.pages = pages;
    info!("notepad reset");

    let mut result = CmdResult::default()
        .with_affected_pages(vec![session.pages.current_page().clone()])
        .with_char_count(session.editors.char_count());
    result.add_message(CmdMessage::info("Notepad reset"));
    Ok(result)
}
