use crate::commands::{CmdMessage, CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::store::StorageBackend;
use tracing::debug;

/// Creates a page, binds its surface and switches to it. Always saves, whatever the
/// autosave setting.
pub fn run<B: StorageBackend, H: SurfaceHost>(session: &mut Session<B, H>) -> Result<CmdResult> {
    let page = session.pages.create_page()?.clone();
    session.editors.bind(page.id, &page.content);
    debug!(page = %page.id, "page created");

    let mut result = super::switch::run(session, page.id)?;
    result.affected_pages = vec![page.clone()];
    result.add_message(CmdMessage::success(format!("Page {} created", page.id)));
    session.persist_or_report(&mut result);
    Ok(result)
}
