//! Application coordinator
//!
//! Wires the note repository to the host bridge: backend selection at
//! startup, the confirm-before-delete flow, haptic feedback, and the typed
//! event stream. Rendering stays outside; this type only owns state.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;

use zametki_bridge::{BridgeBackend, BridgeEvent, ColorScheme, HapticStyle, HostBridge};
use zametki_storage::{Database, LocalBackend, StorageAdapter};

use crate::config::Config;
use crate::note::Note;
use crate::repository::NoteRepository;
use crate::Result;

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSignal {
    /// Nothing; the event was consumed.
    None,
    /// Host back navigation: cancel an in-progress edit or close.
    GoBack,
}

pub struct App {
    config: Config,
    /// Local database, also the fallback store when a bridge is primary
    db: Database,
    /// Host bridge; `None` after startup means local-only mode
    bridge: Option<Arc<dyn HostBridge>>,
    repository: NoteRepository,
    scheme: Arc<RwLock<ColorScheme>>,
}

impl App {
    /// Local-only mode: the SQLite store is the sole backend.
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::from_parts(config, db, None))
    }

    /// Bridge-backed mode: host storage is primary, the local store catches
    /// failed writes.
    pub fn with_bridge(config: Config, bridge: Arc<dyn HostBridge>) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::from_parts(config, db, Some(bridge)))
    }

    fn from_parts(config: Config, db: Database, bridge: Option<Arc<dyn HostBridge>>) -> Self {
        let local = Arc::new(LocalBackend::new(db.clone()));

        let adapter = match &bridge {
            Some(bridge) => {
                StorageAdapter::new(Arc::new(BridgeBackend::new(bridge.clone())), &config.storage_key)
                    .with_fallback(local)
            }
            None => StorageAdapter::new(local, &config.storage_key),
        };

        Self {
            config,
            db,
            bridge,
            repository: NoteRepository::new(adapter),
            scheme: Arc::new(RwLock::new(ColorScheme::default())),
        }
    }

    /// Handshake with the host and load the note collection.
    ///
    /// A failed bridge init drops down to local-only storage; a missing user
    /// or config just leaves the owner/scheme at their defaults.
    pub async fn initialize(&mut self) -> Result<()> {
        if let Some(bridge) = self.bridge.clone() {
            match bridge.init().await {
                Ok(()) => {
                    match bridge.get_user_info().await {
                        Ok(user) => self.repository.set_owner(Some(user.id)),
                        Err(e) => tracing::warn!("User info unavailable: {}", e),
                    }

                    match bridge.get_config().await {
                        Ok(config) => *self.scheme.write() = config.scheme,
                        Err(e) => tracing::warn!("Host config unavailable: {}", e),
                    }
                }
                Err(e) => {
                    tracing::warn!("Bridge init failed, using local storage only: {}", e);
                    self.bridge = None;
                    self.repository = NoteRepository::new(StorageAdapter::new(
                        Arc::new(LocalBackend::new(self.db.clone())),
                        &self.config.storage_key,
                    ));
                }
            }
        }

        self.repository.initialize().await;

        tracing::info!(
            bridge = self.bridge.is_some(),
            note_count = self.repository.len(),
            "App initialized"
        );

        Ok(())
    }

    pub async fn add_note(&self, raw: &str) -> Result<Note> {
        let note = self.repository.add(raw).await?;
        self.haptic(HapticStyle::Light).await;
        Ok(note)
    }

    pub async fn edit_note(&self, id: i64, raw: &str) -> Result<Note> {
        self.repository.edit(id, raw).await
    }

    /// Delete after host confirmation.
    ///
    /// With a bridge present the host shows the prompt; `Ok(false)` means
    /// the user declined and nothing changed. Without a bridge the caller is
    /// expected to have confirmed already. A failed prompt keeps the note.
    pub async fn delete_note(&self, id: i64) -> Result<bool> {
        if let Some(bridge) = &self.bridge {
            match bridge.show_confirm("Delete this note?", "Delete").await {
                Ok(true) => {}
                Ok(false) => return Ok(false),
                Err(e) => {
                    tracing::warn!(note_id = id, "Confirm prompt failed, keeping the note: {}", e);
                    return Ok(false);
                }
            }
        }

        self.repository.remove(id).await?;
        self.haptic(HapticStyle::Medium).await;
        Ok(true)
    }

    pub fn list_notes(&self) -> Vec<Note> {
        self.repository.list()
    }

    pub fn repository(&self) -> &NoteRepository {
        &self.repository
    }

    pub fn color_scheme(&self) -> ColorScheme {
        *self.scheme.read()
    }

    /// Event stream from the host, when one is attached.
    pub fn subscribe(&self) -> Option<mpsc::UnboundedReceiver<BridgeEvent>> {
        self.bridge.as_ref().map(|bridge| bridge.subscribe())
    }

    pub fn handle_event(&self, event: BridgeEvent) -> AppSignal {
        match event {
            BridgeEvent::ConfigChanged { scheme } => {
                *self.scheme.write() = scheme;
                tracing::debug!(?scheme, "Color scheme updated");
                AppSignal::None
            }
            BridgeEvent::GoBack => AppSignal::GoBack,
        }
    }

    async fn haptic(&self, style: HapticStyle) {
        // Fire-and-forget, never surfaced to the user
        if let Some(bridge) = &self.bridge {
            if let Err(e) = bridge.haptic_impact(style).await {
                tracing::debug!("Haptic feedback failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zametki_bridge::{MemoryBridge, UserInfo};

    fn bridged_app(bridge: Arc<MemoryBridge>) -> App {
        App::from_parts(
            Config::new(std::path::PathBuf::from("/tmp/zametki-test")),
            Database::open_in_memory().unwrap(),
            Some(bridge as Arc<dyn HostBridge>),
        )
    }

    fn user(id: &str) -> UserInfo {
        UserInfo {
            id: id.to_string(),
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_initialize_picks_up_user_and_scheme() {
        let bridge = Arc::new(MemoryBridge::new());
        bridge.set_user(user("42"));
        bridge.set_scheme(ColorScheme::SpaceGray);

        let mut app = bridged_app(bridge.clone());
        app.initialize().await.unwrap();

        assert_eq!(app.color_scheme(), ColorScheme::SpaceGray);

        let note = app.add_note("mine").await.unwrap();
        assert_eq!(note.owner_id.as_deref(), Some("42"));
        assert_eq!(bridge.recorded_haptics(), vec![HapticStyle::Light]);
    }

    #[tokio::test]
    async fn test_initialize_loads_existing_notes_from_bridge() {
        let bridge = Arc::new(MemoryBridge::new());
        bridge
            .storage_set(
                "notes",
                r#"[{"id":1,"text":"restored","date":"01.01.2026, 10:00:00"}]"#,
            )
            .await
            .unwrap();

        let mut app = bridged_app(bridge);
        app.initialize().await.unwrap();

        let notes = app.list_notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "restored");
    }

    #[tokio::test]
    async fn test_bridge_init_failure_falls_back_to_local() {
        let bridge = Arc::new(MemoryBridge::new());
        bridge.set_available(false);

        let mut app = bridged_app(bridge);
        app.initialize().await.unwrap();

        // Mutations work against the local store
        app.add_note("local note").await.unwrap();
        let raw = app.db.get_value("notes").unwrap().unwrap();
        assert!(raw.contains("local note"));
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let bridge = Arc::new(MemoryBridge::new());
        let mut app = bridged_app(bridge.clone());
        app.initialize().await.unwrap();

        let note = app.add_note("doomed").await.unwrap();
        assert!(app.delete_note(note.id).await.unwrap());
        assert!(app.list_notes().is_empty());
        assert_eq!(
            bridge.recorded_haptics(),
            vec![HapticStyle::Light, HapticStyle::Medium]
        );
    }

    #[tokio::test]
    async fn test_delete_declined_is_a_noop() {
        let bridge = Arc::new(MemoryBridge::new());
        bridge.set_confirm_answer(false);

        let mut app = bridged_app(bridge);
        app.initialize().await.unwrap();

        let note = app.add_note("survivor").await.unwrap();
        assert!(!app.delete_note(note.id).await.unwrap());
        assert_eq!(app.list_notes().len(), 1);
    }

    #[tokio::test]
    async fn test_events_update_scheme_and_surface_go_back() {
        let bridge = Arc::new(MemoryBridge::new());
        let mut app = bridged_app(bridge.clone());
        app.initialize().await.unwrap();

        let mut rx = app.subscribe().unwrap();
        bridge.emit(BridgeEvent::ConfigChanged {
            scheme: ColorScheme::SpaceGray,
        });
        bridge.emit(BridgeEvent::GoBack);

        let signal = app.handle_event(rx.recv().await.unwrap());
        assert_eq!(signal, AppSignal::None);
        assert_eq!(app.color_scheme(), ColorScheme::SpaceGray);

        let signal = app.handle_event(rx.recv().await.unwrap());
        assert_eq!(signal, AppSignal::GoBack);
    }
}
