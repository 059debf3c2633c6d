//! Key-value backend abstraction
//!
//! Both the local SQLite store and the host-bridge store expose the same
//! async get/set surface, so the rest of the system never branches on which
//! backend is active.

use async_trait::async_trait;

use crate::database::Database;
use crate::Result;

#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Backend name used in log messages.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Local SQLite-backed store.
#[derive(Clone)]
pub struct LocalBackend {
    db: Database,
}

impl LocalBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.db.get_value(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.set_value(key, value)
    }
}
