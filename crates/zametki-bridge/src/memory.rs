//! In-memory host bridge
//!
//! Used when the widget runs outside the host container (local development)
//! and as the test double for everything bridge-facing. The availability
//! switch simulates a host outage so fallback paths can be exercised.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

use crate::bridge::{
    BridgeConfig, BridgeEvent, ColorScheme, HapticStyle, HostBridge, KeyValue, UserInfo,
};
use crate::error::BridgeError;
use crate::Result;

pub struct MemoryBridge {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
    confirm_answer: AtomicBool,
    user: Mutex<Option<UserInfo>>,
    scheme: Mutex<ColorScheme>,
    haptics: Mutex<Vec<HapticStyle>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<BridgeEvent>>>,
}

impl MemoryBridge {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            confirm_answer: AtomicBool::new(true),
            user: Mutex::new(None),
            scheme: Mutex::new(ColorScheme::default()),
            haptics: Mutex::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Simulate the host going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Fix the answer every confirmation prompt will get.
    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn set_user(&self, user: UserInfo) {
        *self.user.lock() = Some(user);
    }

    pub fn set_scheme(&self, scheme: ColorScheme) {
        *self.scheme.lock() = scheme;
    }

    /// Haptic impacts recorded so far, in call order.
    pub fn recorded_haptics(&self) -> Vec<HapticStyle> {
        self.haptics.lock().clone()
    }

    /// Push an event to every live subscriber.
    pub fn emit(&self, event: BridgeEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BridgeError::Unavailable)
        }
    }
}

impl Default for MemoryBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostBridge for MemoryBridge {
    async fn init(&self) -> Result<()> {
        self.ensure_available()
    }

    async fn storage_get(&self, keys: &[&str]) -> Result<Vec<KeyValue>> {
        self.ensure_available()?;
        let entries = self.entries.lock();
        Ok(keys
            .iter()
            .map(|key| KeyValue {
                key: key.to_string(),
                value: entries.get(*key).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn storage_set(&self, key: &str, value: &str) -> Result<bool> {
        self.ensure_available()?;
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn get_user_info(&self) -> Result<UserInfo> {
        self.ensure_available()?;
        self.user
            .lock()
            .clone()
            .ok_or_else(|| BridgeError::Rejected("no authenticated user".to_string()))
    }

    async fn get_config(&self) -> Result<BridgeConfig> {
        self.ensure_available()?;
        Ok(BridgeConfig {
            scheme: *self.scheme.lock(),
        })
    }

    async fn show_confirm(&self, _text: &str, _button_text: &str) -> Result<bool> {
        self.ensure_available()?;
        Ok(self.confirm_answer.load(Ordering::SeqCst))
    }

    async fn haptic_impact(&self, style: HapticStyle) -> Result<()> {
        self.ensure_available()?;
        self.haptics.lock().push(style);
        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<BridgeEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_roundtrip() {
        let bridge = MemoryBridge::new();
        bridge.init().await.unwrap();

        assert!(bridge.storage_set("notes", "[]").await.unwrap());

        let entries = bridge.storage_get(&["notes", "missing"]).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, "[]");
        // Missing keys come back as empty strings
        assert_eq!(entries[1].value, "");
    }

    #[tokio::test]
    async fn test_unavailable_bridge_rejects_requests() {
        let bridge = MemoryBridge::new();
        bridge.set_available(false);

        assert!(matches!(
            bridge.init().await.unwrap_err(),
            BridgeError::Unavailable
        ));
        assert!(matches!(
            bridge.storage_set("notes", "[]").await.unwrap_err(),
            BridgeError::Unavailable
        ));
    }

    #[tokio::test]
    async fn test_event_delivery() {
        let bridge = MemoryBridge::new();
        let mut rx = bridge.subscribe();

        bridge.emit(BridgeEvent::ConfigChanged {
            scheme: ColorScheme::SpaceGray,
        });
        bridge.emit(BridgeEvent::GoBack);

        assert_eq!(
            rx.recv().await.unwrap(),
            BridgeEvent::ConfigChanged {
                scheme: ColorScheme::SpaceGray
            }
        );
        assert_eq!(rx.recv().await.unwrap(), BridgeEvent::GoBack);
    }

    #[tokio::test]
    async fn test_confirm_answer_is_scripted() {
        let bridge = MemoryBridge::new();
        assert!(bridge.show_confirm("Delete?", "Delete").await.unwrap());

        bridge.set_confirm_answer(false);
        assert!(!bridge.show_confirm("Delete?", "Delete").await.unwrap());
    }
}
