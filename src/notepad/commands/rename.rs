use crate::commands::{CmdMessage, CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::model::PageId;
use crate::store::StorageBackend;

/// Renames a page and saves. Blank names fall back to `Page {id}`, long names are cut to
/// 20 characters.
pub fn run<B: StorageBackend, H: SurfaceHost>(
    session: &mut Session<B, H>,
    id: PageId,
    new_name: &str,
) -> Result<CmdResult> {
    let page = session.pages.rename_page(id, new_name)?.clone();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Page renamed to \"{}\"",
        page.name
    )));
    result.affected_pages.push(page);
    session.persist_or_report(&mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::session_with_pages;
    use crate::error::NotepadError;

    #[test]
    fn renames_and_saves() {
        let mut session = session_with_pages(2);
        session.pages.set_auto_save(false);
        let result = run(&mut session, PageId(1), "Ideas").unwrap();

        assert_eq!(result.messages[0].content, "Page renamed to \"Ideas\"");
        let saved = session.persistence.load().unwrap().unwrap();
        assert_eq!(saved.pages[&PageId(1)].name, "Ideas");
    }

    #[test]
    fn blank_name_restores_default() {
        let mut session = session_with_pages(2);
        run(&mut session, PageId(2), "Ideas").unwrap();
        run(&mut session, PageId(2), "   ").unwrap();
        assert_eq!(session.pages.get(PageId(2)).unwrap().name, "Page 2");
    }

    #[test]
    fn long_name_is_truncated() {
        let mut session = session_with_pages(1);
        let result = run(&mut session, PageId(1), &"A".repeat(30)).unwrap();
        assert_eq!(result.affected_pages[0].name, "A".repeat(20));
    }

    #[test]
    fn unknown_page_is_an_error() {
        let mut session = session_with_pages(1);
        assert!(matches!(
            run(&mut session, PageId(3), "x"),
            Err(NotepadError::UnknownPage(PageId(3)))
        ));
        assert!(session.persistence.load().unwrap().is_none());
    }
}
