//! Host bridge contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::Result;

/// One entry of a bulk storage read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Authenticated user as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Color scheme pushed by the host on config changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    BrightLight,
    SpaceGray,
}

impl ColorScheme {
    /// Parse the platform scheme string. Unknown schemes map to the light
    /// default.
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "space_gray" => ColorScheme::SpaceGray,
            _ => ColorScheme::BrightLight,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::SpaceGray
    }
}

/// Haptic feedback strength for fire-and-forget impact calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStyle {
    Light,
    Medium,
    Heavy,
}

/// Host configuration snapshot returned by the initial config request.
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeConfig {
    pub scheme: ColorScheme,
}

/// Typed events delivered through the bridge subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Host configuration changed (currently only the color scheme matters).
    ConfigChanged { scheme: ColorScheme },
    /// Host back navigation was triggered.
    GoBack,
}

/// Async surface of the host platform.
///
/// Implementations are expected to resolve or reject in bounded time; there
/// is no timeout handling on this side of the seam.
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Handshake with the host. Must be called before any other request.
    async fn init(&self) -> Result<()>;

    /// Bulk read from the host key-value store. Keys the host has no value
    /// for come back with an empty string, matching the platform contract.
    async fn storage_get(&self, keys: &[&str]) -> Result<Vec<KeyValue>>;

    /// Write one key. `Ok(false)` means the host refused the write.
    async fn storage_set(&self, key: &str, value: &str) -> Result<bool>;

    async fn get_user_info(&self) -> Result<UserInfo>;

    /// Current host configuration; later changes arrive as
    /// [`BridgeEvent::ConfigChanged`].
    async fn get_config(&self) -> Result<BridgeConfig>;

    /// User-facing confirmation prompt. `Ok(true)` when the user accepted.
    async fn show_confirm(&self, text: &str, button_text: &str) -> Result<bool>;

    /// Fire-and-forget haptic feedback; callers ignore the result beyond
    /// logging.
    async fn haptic_impact(&self, style: HapticStyle) -> Result<()>;

    /// Subscribe to host events. Each call returns an independent receiver.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<BridgeEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parsing() {
        assert_eq!(
            ColorScheme::from_scheme("space_gray"),
            ColorScheme::SpaceGray
        );
        assert_eq!(
            ColorScheme::from_scheme("bright_light"),
            ColorScheme::BrightLight
        );
        // Unknown schemes fall back to light
        assert_eq!(
            ColorScheme::from_scheme("client_dark_v2"),
            ColorScheme::BrightLight
        );
        assert!(ColorScheme::SpaceGray.is_dark());
    }
}
