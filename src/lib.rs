//! # Kanban Core
//!
//! Board model, drag-and-drop reconciliation and persistence for a personal,
//! single-client kanban board.
//!
//! Boards are plain values: every operation hands back the next board and
//! nothing here fails on malformed input. Moves that cannot be resolved come
//! back as `None`, unknown ids are no-ops and corrupt stored boards are
//! replaced with fresh ones.

pub mod domain;
pub mod error;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, Card, Column},
    dnd::{clone_board, move_card, DropTarget},
    id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator},
};
pub use error::{KanbanError, Result};
pub use session::{BoardSession, DragEvent, DragState};
pub use storage::{storage_key, BoardStore, DetachedStore, MemoryStore};
#[cfg(feature = "file-storage")]
pub use storage::FileStore;
