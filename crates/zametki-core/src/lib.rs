//! Zametki Core
//!
//! State and persistence layer for a minimal note widget. The rendering
//! layer subscribes to this crate; it never touches storage directly.

mod app;
mod config;
mod error;
mod note;
mod repository;

pub use app::{App, AppSignal};
pub use config::{Config, NOTES_KEY};
pub use error::CoreError;
pub use note::{chars_remaining, validate_text, Note, MAX_TEXT_LEN};
pub use repository::NoteRepository;

// Re-export the collaborating layers
pub use zametki_bridge::{
    BridgeBackend, BridgeConfig, BridgeError, BridgeEvent, ColorScheme, HapticStyle, HostBridge,
    KeyValue, MemoryBridge, UserInfo,
};
pub use zametki_storage::{
    Database, KeyValueBackend, LocalBackend, SaveOutcome, StorageAdapter, StorageError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
