use crate::model::PageId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotepadError {
    #[error("Page not found: {0}")]
    UnknownPage(PageId),

    #[error("Cannot delete the last page")]
    LastPage,

    #[error("Could not save notes: {0}")]
    Persistence(String),

    #[error("Saved notes are unreadable: {0}")]
    CorruptState(String),

    #[error("Invalid format command: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NotepadError>;
