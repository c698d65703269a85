use crate::domain::{
    board::Board,
    dnd::{clone_board, move_card, DropTarget},
};
use tracing::{debug, warn};

/// Phase of the drag gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active_card_id: String,
        /// Board as it was when the gesture started, restored on cancel
        snapshot: Board,
    },
}

/// Events raised by the pointer gesture. A `None` target means the pointer is
/// not over any drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { card_id: String },
    Over { target: Option<DropTarget> },
    End { target: Option<DropTarget> },
    Cancel,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn active_card_id(&self) -> Option<&str> {
        match self {
            Self::Dragging { active_card_id, .. } => Some(active_card_id.as_str()),
            Self::Idle => None,
        }
    }

    /// Applies an event to the current board, yielding the next state and board.
    ///
    /// `Over` moves the card live, `End` applies the final move and returns to
    /// idle, `Cancel` returns to idle with the snapshot taken at `Start`.
    /// Events other than `Start` are ignored while idle.
    pub fn transition(self, event: DragEvent, board: Board) -> (DragState, Board) {
        match (self, event) {
            (Self::Idle, DragEvent::Start { card_id }) => {
                debug!(card = %card_id, "drag started");
                let snapshot = clone_board(&board);
                (
                    Self::Dragging {
                        active_card_id: card_id,
                        snapshot,
                    },
                    board,
                )
            }
            (Self::Dragging { snapshot, .. }, DragEvent::Start { card_id }) => {
                warn!(card = %card_id, "drag started while another drag is active");
                (
                    Self::Dragging {
                        active_card_id: card_id,
                        snapshot,
                    },
                    board,
                )
            }
            (
                Self::Dragging {
                    active_card_id,
                    snapshot,
                },
                DragEvent::Over { target },
            ) => {
                let board = apply_move(board, &active_card_id, target.as_ref());
                (
                    Self::Dragging {
                        active_card_id,
                        snapshot,
                    },
                    board,
                )
            }
            (Self::Dragging { active_card_id, .. }, DragEvent::End { target }) => {
                debug!(card = %active_card_id, "drag ended");
                let board = apply_move(board, &active_card_id, target.as_ref());
                (Self::Idle, board)
            }
            (Self::Dragging { snapshot, .. }, DragEvent::Cancel) => {
                debug!("drag cancelled, restoring snapshot");
                (Self::Idle, snapshot)
            }
            (Self::Idle, event) => {
                debug!(?event, "no drag in progress, ignoring event");
                (Self::Idle, board)
            }
        }
    }
}

fn apply_move(board: Board, active_card_id: &str, target: Option<&DropTarget>) -> Board {
    match target.and_then(|target| move_card(&board, active_card_id, target)) {
        Some(next) => next,
        None => board,
    }
}
