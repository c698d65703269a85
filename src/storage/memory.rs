use crate::{
    domain::{Board, BoardConfig, IdGenerator, UuidIdGenerator},
    error::Result,
    storage::{restore_board, storage_key, BoardStore},
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory string key/value store holding JSON-encoded boards.
///
/// Values are kept as raw strings so callers can plant arbitrary (including
/// corrupt) data with [`MemoryStore::set_raw`].
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    config: BoardConfig,
    ids: Arc<dyn IdGenerator>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config: BoardConfig::default(),
            ids: Arc::new(UuidIdGenerator),
        }
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub async fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn set_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn load(&self, slug: &str) -> Result<Board> {
        let key = storage_key(slug);
        let mut entries = self.entries.write().await;

        let restored = restore_board(
            slug,
            entries.get(&key).map(String::as_str),
            &self.config,
            self.ids.as_ref(),
        );
        if restored.fresh {
            entries.insert(key, serde_json::to_string(&restored.board)?);
        }

        Ok(restored.board)
    }

    async fn save(&self, board: &Board) -> Result<()> {
        let json = serde_json::to_string(board)?;
        debug!(slug = %board.slug, "saving board");
        self.entries
            .write()
            .await
            .insert(storage_key(&board.slug), json);
        Ok(())
    }
}
