//! Zametki Storage Layer
//!
//! Key-value persistence for the note collection. A local SQLite store acts
//! as the durable backend; remote backends plug in through [`KeyValueBackend`],
//! and [`StorageAdapter`] adds fail-soft reads and fallback writes on top.

mod adapter;
mod backend;
mod database;
mod error;
mod migrations;

pub use adapter::{SaveOutcome, StorageAdapter};
pub use backend::{KeyValueBackend, LocalBackend};
pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
