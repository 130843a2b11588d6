use crate::commands::{CmdResult, Session};
use crate::editor::{FormatCommand, SurfaceHost};
use crate::error::Result;
use crate::store::StorageBackend;
use tracing::debug;

/// Applies `command` to the selection of the active surface. Inert when no surface is
/// active. A formatted surface counts as an edit.
pub fn run<B: StorageBackend, H: SurfaceHost>(
    session: &mut Session<B, H>,
    command: &FormatCommand,
) -> Result<CmdResult> {
    let Some(id) = session.editors.format(command) else {
        debug!(%command, "no active surface; format ignored");
        return Ok(CmdResult::default());
    };
    debug!(page = %id, %command, "format applied");
    super::edit::surface_edited(session, id)
}
