use crate::commands::{CmdMessage, CmdResult, Confirm, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::model::CLEARED_CONTENT;
use crate::store::StorageBackend;

/// Empties the current page after confirmation. Saves only when autosave is on.
pub fn run<B, H, C>(session: &mut Session<B, H>, confirm: &mut C) -> Result<CmdResult>
where
    B: StorageBackend,
    H: SurfaceHost,
    C: Confirm + ?Sized,
{
    let id = session.pages.current();
    if !confirm.confirm("Clear current page? This action cannot be undone.") {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Clear cancelled"));
        return Ok(result);
    }

    session.editors.write(id, CLEARED_CONTENT);
    session.pages.update_content(id, CLEARED_CONTENT)?;

    let mut result = CmdResult::default()
        .with_affected_pages(vec![session.pages.current_page().clone()])
        .with_char_count(session.editors.char_count());
    result.add_message(CmdMessage::info("Page cleared"));
    session.autosave(&mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{no, session_with_pages, yes};
    use crate::model::PageId;

    #[test]
    fn clears_only_the_current_page() {
        let mut session = session_with_pages(2);
        session.editors.write(PageId(1), "<p>keep</p>");
        session.editors.write(PageId(2), "<p>drop</p>");

        let result = run(&mut session, &mut yes()).unwrap();

        assert_eq!(session.editors.read(PageId(2)).as_deref(), Some(CLEARED_CONTENT));
        assert_eq!(session.pages.get(PageId(2)).unwrap().content, CLEARED_CONTENT);
        assert_eq!(session.editors.read(PageId(1)).as_deref(), Some("<p>keep</p>"));
        assert_eq!(result.char_count, Some(4));
    }

    #[test]
    fn autosaves_when_enabled() {
        let mut session = session_with_pages(1);
        let result = run(&mut session, &mut yes()).unwrap();
        assert!(result.saved_at.is_some());
        let saved = session.persistence.load().unwrap().unwrap();
        assert_eq!(saved.pages[&PageId(1)].content, CLEARED_CONTENT);
    }

    #[test]
    fn no_save_when_autosave_off() {
        let mut session = session_with_pages(1);
        session.pages.set_auto_save(false);
        let result = run(&mut session, &mut yes()).unwrap();
        assert!(result.saved_at.is_none());
        assert!(session.persistence.load().unwrap().is_none());
    }

    #[test]
    fn declined_keeps_content() {
        let mut session = session_with_pages(1);
        session.editors.write(PageId(1), "<p>keep</p>");
        let result = run(&mut session, &mut no()).unwrap();
        assert_eq!(result.messages[0].content, "Clear cancelled");
        assert_eq!(session.editors.read(PageId(1)).as_deref(), Some("<p>keep</p>"));
    }
}
