use crate::commands::{CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::store::StorageBackend;

/// Lists every page with its status, plus the total character count and the time of the
/// last save.
pub fn run<B: StorageBackend, H: SurfaceHost>(session: &Session<B, H>) -> Result<CmdResult> {
    let mut result = CmdResult::default()
        .with_listed_pages(session.summaries())
        .with_char_count(session.editors.char_count());
    result.saved_at = session.persistence.last_saved();
    Ok(result)
}
