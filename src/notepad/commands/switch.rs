use crate::commands::{CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::model::PageId;
use crate::store::StorageBackend;
use tracing::debug;

/// Makes `id` the current page. The previously current page becomes inactive.
pub fn run<B: StorageBackend, H: SurfaceHost>(
    session: &mut Session<B, H>,
    id: PageId,
) -> Result<CmdResult> {
    let previous = session.pages.current();
    session.pages.switch_current(id)?;
    session.editors.activate(id);
    debug!(from = %previous, to = %id, "switched page");

    Ok(CmdResult::default()
        .with_affected_pages(vec![session.pages.current_page().clone()])
        .with_char_count(session.editors.char_count()))
}
