use crate::{
    domain::{Board, BoardConfig, IdGenerator},
    error::Result,
};
use async_trait::async_trait;
use tracing::{info, warn};

pub mod detached;
#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory;

pub use detached::DetachedStore;
#[cfg(feature = "file-storage")]
pub use file_storage::FileStore;
pub use memory::MemoryStore;

/// Version segment of every storage key
pub const STORAGE_VERSION: &str = "v1";

/// Key a board is stored under: `kanban:board:{slug}:v1`
pub fn storage_key(slug: &str) -> String {
    format!("kanban:board:{}:{}", slug, STORAGE_VERSION)
}

/// Persistence for boards, keyed by slug.
///
/// `load` never fails because of missing or unreadable board data: a fresh
/// board is created, written back and returned instead. Errors are reserved
/// for the backend itself failing.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Loads the board for a slug, creating it if needed
    async fn load(&self, slug: &str) -> Result<Board>;

    /// Overwrites the stored board for `board.slug`
    async fn save(&self, board: &Board) -> Result<()>;
}

/// Outcome of decoding a stored value
pub(crate) struct Restored {
    pub board: Board,
    /// The board was synthesized and still has to be written back
    pub fresh: bool,
}

/// Decodes a stored board, falling back to a fresh one when the value is
/// absent or does not parse.
pub(crate) fn restore_board(
    slug: &str,
    raw: Option<&str>,
    config: &BoardConfig,
    ids: &dyn IdGenerator,
) -> Restored {
    match raw.map(serde_json::from_str::<Board>) {
        Some(Ok(board)) => Restored {
            board,
            fresh: false,
        },
        Some(Err(err)) => {
            warn!(slug, error = %err, "stored board is corrupt, replacing it");
            Restored {
                board: Board::initial(slug, config, ids),
                fresh: true,
            }
        }
        None => {
            info!(slug, "creating board");
            Restored {
                board: Board::initial(slug, config, ids),
                fresh: true,
            }
        }
    }
}
