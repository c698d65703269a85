//! The live board behind one view.
//!
//! A [`BoardSession`] owns the current board, sequences drag events through
//! [`DragState`] and writes every committed change through its [`BoardStore`].
//! Drag-over updates stay in memory until the gesture ends or is cancelled.

use crate::{
    domain::{Board, BoardConfig, Card, DropTarget, IdGenerator},
    error::Result,
    storage::BoardStore,
};
use std::sync::Arc;

pub mod drag;

pub use drag::{DragEvent, DragState};

/// The card being dragged and the column it currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCard<'a> {
    pub card: &'a Card,
    pub column_id: &'a str,
}

pub struct BoardSession {
    board: Board,
    drag: DragState,
    config: BoardConfig,
    store: Arc<dyn BoardStore>,
    ids: Arc<dyn IdGenerator>,
}

impl BoardSession {
    /// Loads the board for `slug` from the store
    pub async fn open(
        slug: &str,
        store: Arc<dyn BoardStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        let board = store.load(slug).await?;
        Ok(Self {
            board,
            drag: DragState::Idle,
            config: BoardConfig::default(),
            store,
            ids,
        })
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// The dragged card, if a drag is in progress and the card is on the board
    pub fn active_card(&self) -> Option<ActiveCard<'_>> {
        let card_id = self.drag.active_card_id()?;
        self.board.columns.iter().find_map(|column| {
            column
                .cards
                .iter()
                .find(|card| card.id == card_id)
                .map(|card| ActiveCard {
                    card,
                    column_id: &column.id,
                })
        })
    }

    /// Replaces the board with the one stored under another slug.
    ///
    /// A drag in progress is abandoned.
    pub async fn switch_slug(&mut self, slug: &str) -> Result<()> {
        self.board = self.store.load(slug).await?;
        self.drag = DragState::Idle;
        Ok(())
    }

    pub async fn add_column(&mut self) -> Result<()> {
        let next = self
            .board
            .clone()
            .add_column(&self.config, self.ids.as_ref());
        self.commit(next).await
    }

    pub async fn rename_column(&mut self, column_id: &str, name: &str) -> Result<()> {
        let next = self.board.clone().rename_column(column_id, name);
        self.commit(next).await
    }

    pub async fn delete_column(&mut self, column_id: &str) -> Result<()> {
        let next = self.board.clone().delete_column(column_id);
        self.commit(next).await
    }

    pub async fn add_card(&mut self, column_id: &str, title: &str) -> Result<()> {
        let next = self
            .board
            .clone()
            .add_card(column_id, title, self.ids.as_ref());
        self.commit(next).await
    }

    pub async fn edit_card(&mut self, card_id: &str, column_id: &str, title: &str) -> Result<()> {
        let next = self.board.clone().edit_card(card_id, column_id, title);
        self.commit(next).await
    }

    pub async fn delete_card(&mut self, card_id: &str, column_id: &str) -> Result<()> {
        let next = self.board.clone().delete_card(card_id, column_id);
        self.commit(next).await
    }

    pub async fn move_card_to_column(
        &mut self,
        card_id: &str,
        from_column_id: &str,
        to_column_id: &str,
    ) -> Result<()> {
        let next = self
            .board
            .clone()
            .move_card_to_column(card_id, from_column_id, to_column_id);
        self.commit(next).await
    }

    pub fn drag_start(&mut self, card_id: &str) {
        self.dispatch(DragEvent::Start {
            card_id: card_id.to_string(),
        });
    }

    pub fn drag_over(&mut self, target: Option<&DropTarget>) {
        self.dispatch(DragEvent::Over {
            target: target.cloned(),
        });
    }

    pub async fn drag_end(&mut self, target: Option<&DropTarget>) -> Result<()> {
        self.dispatch(DragEvent::End {
            target: target.cloned(),
        });
        self.store.save(&self.board).await
    }

    pub async fn drag_cancel(&mut self) -> Result<()> {
        self.dispatch(DragEvent::Cancel);
        self.store.save(&self.board).await
    }

    fn dispatch(&mut self, event: DragEvent) {
        let drag = std::mem::take(&mut self.drag);
        let board = std::mem::take(&mut self.board);
        let (drag, board) = drag.transition(event, board);
        self.drag = drag;
        self.board = board;
    }

    async fn commit(&mut self, next: Board) -> Result<()> {
        self.board = next;
        self.store.save(&self.board).await
    }
}
