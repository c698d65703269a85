use crate::{
    domain::{Board, BoardConfig, IdGenerator, UuidIdGenerator},
    error::Result,
    storage::BoardStore,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Store for contexts without persistent storage (e.g. server-side rendering).
///
/// Every load yields a fresh board and saves are discarded.
pub struct DetachedStore {
    config: BoardConfig,
    ids: Arc<dyn IdGenerator>,
}

impl DetachedStore {
    pub fn new() -> Self {
        Self {
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
}

impl Default for DetachedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardStore for DetachedStore {
    async fn load(&self, slug: &str) -> Result<Board> {
        Ok(Board::initial(slug, &self.config, self.ids.as_ref()))
    }

    async fn save(&self, board: &Board) -> Result<()> {
        debug!(slug = %board.slug, "detached store, discarding save");
        Ok(())
    }
}
