//! Zametki Host Bridge
//!
//! Contract for the host platform the widget runs inside: remote key-value
//! storage, user identity, confirmation prompts, haptics, and the typed
//! event stream. The transport itself is the host's concern; this crate only
//! fixes the surface the rest of the system talks to.

mod backend;
mod bridge;
mod error;
mod memory;

pub use backend::BridgeBackend;
pub use bridge::{
    BridgeConfig, BridgeEvent, ColorScheme, HapticStyle, HostBridge, KeyValue, UserInfo,
};
pub use error::BridgeError;
pub use memory::MemoryBridge;

pub type Result<T> = std::result::Result<T, BridgeError>;
