pub mod board;
pub mod dnd;
pub mod id;

pub use board::{Board, BoardConfig, Card, Column};
pub use dnd::{clone_board, move_card, DropData, DropTarget, SortableData};
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
