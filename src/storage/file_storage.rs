use crate::{
    domain::{Board, BoardConfig, IdGenerator, UuidIdGenerator},
    error::{KanbanError, Result},
    storage::{restore_board, storage_key, BoardStore},
};
use async_trait::async_trait;
use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::fs;
use tracing::{debug, warn};

/// File-based board storage: one JSON file per storage key
pub struct FileStore {
    root_path: PathBuf,
    config: BoardConfig,
    ids: Arc<dyn IdGenerator>,
}

impl FileStore {
    const KANBAN_DIR: &'static str = ".kanban";

    /// Creates a new FileStore keeping its files under `root/.kanban`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::KANBAN_DIR),
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

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Path of the file holding the board for a slug
    pub fn board_file(&self, slug: &str) -> PathBuf {
        self.root_path.join(file_name_for_key(&storage_key(slug)))
    }

    /// Creates the storage directory
    pub async fn initialize(&self) -> Result<()> {
        if self.root_path.exists() {
            if !self.root_path.is_dir() {
                return Err(KanbanError::Storage(format!(
                    "{} exists and is not a directory",
                    self.root_path.display()
                )));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.root_path).await?;
        Ok(())
    }

    async fn write_board(&self, board: &Board) -> Result<()> {
        self.initialize().await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(&board.slug), json).await?;
        Ok(())
    }
}

/// Maps a storage key to a portable file name: `:` becomes `.` and anything
/// outside `[A-Za-z0-9_-]`, `.` included, is percent-encoded. Distinct keys
/// always map to distinct names.
fn file_name_for_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 5);
    for byte in key.bytes() {
        match byte {
            b':' => name.push('.'),
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' => {
                name.push(byte as char)
            }
            _ => {
                let _ = write!(name, "%{:02X}", byte);
            }
        }
    }
    name.push_str(".json");
    name
}

#[async_trait]
impl BoardStore for FileStore {
    async fn load(&self, slug: &str) -> Result<Board> {
        let file_path = self.board_file(slug);

        let contents = if file_path.exists() {
            // Invalid UTF-8 counts as corrupt data, not as an I/O failure
            let bytes = fs::read(&file_path).await?;
            match String::from_utf8(bytes) {
                Ok(contents) => Some(contents),
                Err(err) => {
                    warn!(slug, error = %err, "stored board is not valid UTF-8, replacing it");
                    None
                }
            }
        } else {
            None
        };

        let restored = restore_board(
            slug,
            contents.as_deref(),
            &self.config,
            self.ids.as_ref(),
        );
        if restored.fresh {
            self.write_board(&restored.board).await?;
        }

        Ok(restored.board)
    }

    async fn save(&self, board: &Board) -> Result<()> {
        debug!(slug = %board.slug, path = %self.board_file(&board.slug).display(), "saving board");
        self.write_board(board).await
    }
}
