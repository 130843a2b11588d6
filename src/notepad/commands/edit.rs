use crate::commands::{CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::{NotepadError, Result};
use crate::model::PageId;
use crate::store::StorageBackend;

/// Handles a change reported by the surface of `id`: the page store picks up the surface
/// content, the character count is recomputed over every surface, and with autosave on the
/// notepad is written straight away.
///
/// Every call writes; edits are not coalesced.
pub fn surface_edited<B: StorageBackend, H: SurfaceHost>(
    session: &mut Session<B, H>,
    id: PageId,
) -> Result<CmdResult> {
    let content = session
        .editors
        .read(id)
        .ok_or(NotepadError::UnknownPage(id))?;
    session.pages.update_content(id, content)?;

    let mut result = CmdResult::default().with_char_count(session.editors.char_count());
    session.autosave(&mut result);
    Ok(result)
}

/// Replaces the content of page `id` through its surface, as if the user had typed it.
pub fn write<B: StorageBackend, H: SurfaceHost>(
    session: &mut Session<B, H>,
    id: PageId,
    content: &str,
) -> Result<CmdResult> {
    if !session.editors.write(id, content) {
        return Err(NotepadError::UnknownPage(id));
    }
    let mut result = surface_edited(session, id)?;
    if let Some(page) = session.pages.get(id) {
        result.affected_pages.push(page.clone());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::session_with_pages;

    #[test]
    fn edit_updates_store_and_count() {
        let mut session = session_with_pages(2);
        session.editors.host_mut().write(PageId(1), "<p>hello</p>");
        session.editors.host_mut().write(PageId(2), "<p>you</p>");

        let result = surface_edited(&mut session, PageId(1)).unwrap();

        assert_eq!(session.pages.get(PageId(1)).unwrap().content, "<p>hello</p>");
        assert_eq!(result.char_count, Some(8));
    }

    #[test]
    fn every_edit_writes_when_autosave_on() {
        let mut session = session_with_pages(1);
        for text in ["<p>a</p>", "<p>ab</p>", "<p>abc</p>"] {
            write(&mut session, PageId(1), text).unwrap();
        }
        // Two keys per save.
        assert_eq!(session.persistence.backend().write_count(), 6);
        let saved = session.persistence.load().unwrap().unwrap();
        assert_eq!(saved.pages[&PageId(1)].content, "<p>abc</p>");
    }

    #[test]
    fn no_write_when_autosave_off() {
        let mut session = session_with_pages(1);
        session.pages.set_auto_save(false);
        let result = write(&mut session, PageId(1), "<p>x</p>").unwrap();

        assert!(result.saved_at.is_none());
        assert_eq!(session.persistence.backend().write_count(), 0);
        assert_eq!(session.pages.get(PageId(1)).unwrap().content, "<p>x</p>");
    }

    #[test]
    fn unbound_page_is_an_error() {
        let mut session = session_with_pages(1);
        assert!(matches!(
            surface_edited(&mut session, PageId(4)),
            Err(NotepadError::UnknownPage(PageId(4)))
        ));
        assert!(matches!(
            write(&mut session, PageId(4), "x"),
            Err(NotepadError::UnknownPage(PageId(4)))
        ));
    }
}
