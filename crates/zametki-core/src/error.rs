//! Core error types

use thiserror::Error;

use crate::note::MAX_TEXT_LEN;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Note cannot be empty")]
    EmptyText,

    #[error("Note is over the {MAX_TEXT_LEN} character limit ({len})")]
    TextTooLong { len: usize },

    #[error("Note not found: {0}")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] zametki_storage::StorageError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] zametki_bridge::BridgeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
