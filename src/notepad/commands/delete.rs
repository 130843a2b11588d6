use crate::commands::{CmdMessage, CmdResult, Confirm, Session};
use crate::editor::SurfaceHost;
use crate::error::{NotepadError, Result};
use crate::model::PageId;
use crate::store::StorageBackend;
use tracing::debug;

/// Deletes a page after confirmation.
///
/// The last page can never be deleted; that is checked before asking. Deleting the
/// current page first switches to the lowest other page. Always saves.
pub fn run<B, H, C>(session: &mut Session<B, H>, id: PageId, confirm: &mut C) -> Result<CmdResult>
where
    B: StorageBackend,
    H: SurfaceHost,
    C: Confirm + ?Sized,
{
    if session.pages.len() <= 1 {
        return Err(NotepadError::LastPage);
    }
    let name = session
        .pages
        .get(id)
        .map(|p| p.name.clone())
        .ok_or(NotepadError::UnknownPage(id))?;

    let question = format!("Delete \"{}\"? This action cannot be undone.", name);
    if !confirm.confirm(&question) {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Delete cancelled"));
        return Ok(result);
    }

    if session.pages.current() == id {
        if let Some(other) = session.pages.lowest_other_than(id) {
            super::switch::run(session, other)?;
        }
    }

    let removed = session.pages.delete_page(id)?;
    session.editors.unbind(id);
    debug!(page = %id, "page deleted");

    let mut result = CmdResult::default()
        .with_affected_pages(vec![removed])
        .with_char_count(session.editors.char_count());
    result.add_message(CmdMessage::info(format!("Page {} deleted", id)));
    session.persist_or_report(&mut result);
    Ok(result)
}
