use crate::commands::{CmdMessage, CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::Result;
use crate::store::StorageBackend;
use chrono::{DateTime, Local, Utc};
use tracing::info;

/// Writes the whole notepad now. Unlike the implicit saves after other commands, a failed
/// write is returned as an error.
pub fn run<B: StorageBackend, H: SurfaceHost>(
    session: &mut Session<B, H>,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    session.persist(now)?;
    info!(pages = session.pages.len(), "notes saved");

    let mut result = CmdResult::default();
    result.saved_at = Some(now);
    result.add_message(CmdMessage::success(format!(
        "Last saved: {}",
        now.with_timezone(&Local).format("%H:%M")
    )));
    Ok(result)
}
