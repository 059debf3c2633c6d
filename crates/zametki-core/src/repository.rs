//! Note repository
//!
//! Owns the in-memory collection and sequences every mutation with a full
//! flush through the storage adapter. Newest notes sit at the front.

use parking_lot::RwLock;
use std::sync::Arc;

use zametki_storage::StorageAdapter;

use crate::error::CoreError;
use crate::note::{validate_text, Note};
use crate::Result;

pub struct NoteRepository {
    /// In-memory collection, newest first
    notes: Arc<RwLock<Vec<Note>>>,
    /// Storage adapter for persistence
    store: Arc<StorageAdapter>,
    /// Owner stamped onto new notes when the host identified a user
    owner_id: Arc<RwLock<Option<String>>>,
}

impl NoteRepository {
    pub fn new(store: StorageAdapter) -> Self {
        Self {
            notes: Arc::new(RwLock::new(Vec::new())),
            store: Arc::new(store),
            owner_id: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_owner(&self, owner_id: Option<String>) {
        *self.owner_id.write() = owner_id;
    }

    pub fn owner(&self) -> Option<String> {
        self.owner_id.read().clone()
    }

    /// Load the persisted collection. Fail-soft: storage problems yield an
    /// empty collection instead of an error.
    pub async fn initialize(&self) {
        let loaded: Vec<Note> = self.store.load().await;
        let note_count = loaded.len();
        *self.notes.write() = loaded;

        tracing::info!(note_count, "Loaded notes");
    }

    /// Create a note from raw input and prepend it to the collection.
    ///
    /// A failed save leaves the in-memory mutation in place and surfaces the
    /// error; the next mutation retries the flush.
    pub async fn add(&self, raw: &str) -> Result<Note> {
        let text = validate_text(raw)?;

        let (note, snapshot) = {
            let mut notes = self.notes.write();
            let note = Note::new(next_id(&notes), text, self.owner_id.read().clone());
            notes.insert(0, note.clone());
            (note, notes.clone())
        };

        self.store.save(&snapshot).await?;

        tracing::info!(note_id = note.id, "Added note");

        Ok(note)
    }

    /// Replace a note's text and refresh its date, keeping id and position.
    pub async fn edit(&self, id: i64, raw: &str) -> Result<Note> {
        let text = validate_text(raw)?;

        let (note, snapshot) = {
            let mut notes = self.notes.write();
            let index = notes
                .iter()
                .position(|note| note.id == id)
                .ok_or(CoreError::NotFound(id))?;

            notes[index].set_text(text);
            (notes[index].clone(), notes.clone())
        };

        self.store.save(&snapshot).await?;

        tracing::info!(note_id = id, "Edited note");

        Ok(note)
    }

    /// Remove the note with the given id.
    pub async fn remove(&self, id: i64) -> Result<()> {
        let snapshot = {
            let mut notes = self.notes.write();
            let before = notes.len();
            notes.retain(|note| note.id != id);

            if notes.len() == before {
                return Err(CoreError::NotFound(id));
            }
            notes.clone()
        };

        self.store.save(&snapshot).await?;

        tracing::info!(note_id = id, "Deleted note");

        Ok(())
    }

    /// Current in-memory order, newest first. Does not re-read storage.
    pub fn list(&self) -> Vec<Note> {
        self.notes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }
}

impl Clone for NoteRepository {
    fn clone(&self) -> Self {
        Self {
            notes: Arc::clone(&self.notes),
            store: Arc::clone(&self.store),
            owner_id: Arc::clone(&self.owner_id),
        }
    }
}

/// Millisecond timestamp, bumped past the current maximum so ids stay unique
/// when notes are created within the same millisecond.
fn next_id(notes: &[Note]) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let max_id = notes.iter().map(|note| note.id).max().unwrap_or(0);
    now.max(max_id + 1)
}
