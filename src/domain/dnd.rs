//! Drag-and-drop reconciliation.
//!
//! [`move_card`] turns an in-progress drag gesture into the next board layout.
//! It never fails: anything it cannot resolve, and any move that would leave the
//! board as it is, comes back as `None` and the caller keeps its current board.

use crate::domain::board::{Board, Column};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Position reported by the sortable list under the pointer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

/// Structured hints attached to a drop target. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<SortableData>,
}

/// Where a dragged card currently is, or was released.
///
/// `id` is either a column id or a card id; `data` carries whatever the drag
/// source knew about the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub id: String,
    #[serde(default)]
    pub data: DropData,
}

impl DropTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: DropData::default(),
        }
    }

    pub fn in_column(mut self, column_id: impl Into<String>) -> Self {
        self.data.column_id = Some(column_id.into());
        self
    }

    pub fn anchored_to(mut self, card_id: impl Into<String>) -> Self {
        self.data.card_id = Some(card_id.into());
        self
    }

    pub fn at_index(mut self, index: i64) -> Self {
        self.data.sortable = Some(SortableData { index: Some(index) });
        self
    }

    /// Explicit index, ignoring negative values
    fn index(&self) -> Option<usize> {
        let index = self.data.sortable.as_ref()?.index?;
        usize::try_from(index).ok()
    }
}

/// Deep, independent copy of a board, used as the rollback snapshot of a drag.
pub fn clone_board(board: &Board) -> Board {
    board.clone()
}

/// Computes the board that results from dropping `active_card_id` on `target`.
///
/// Resolution order:
/// 1. the source column is the first column holding the active card;
/// 2. the destination is `data.column_id`, else the column named by `target.id`,
///    else the column holding the card named by `target.id` (which then also
///    becomes the anchor card unless `data.card_id` already names one);
/// 3. the index is the explicit sortable index, else the anchor's position in
///    the destination, else the destination length.
///
/// Within one column the index is clamped to the last slot and landing on the
/// current position is a no-op. Across columns the index is clamped to the
/// destination length, and a stale copy of the card already sitting in the
/// destination is dropped first.
///
/// # Examples
/// ```
/// use kanban_core::domain::board::{Board, Card, Column};
/// use kanban_core::domain::dnd::{move_card, DropTarget};
///
/// let board = Board::new(
///     "board-1",
///     "demo",
///     vec![Column::new("col-todo", "Todo")
///         .with_cards(vec![Card::new("card-1", "A"), Card::new("card-2", "B")])],
/// );
///
/// let target = DropTarget::new("card-2")
///     .in_column("col-todo")
///     .anchored_to("card-2")
///     .at_index(1);
/// let next = move_card(&board, "card-1", &target).unwrap();
/// assert_eq!(next.columns[0].cards[0].id, "card-2");
/// ```
pub fn move_card(board: &Board, active_card_id: &str, target: &DropTarget) -> Option<Board> {
    let Some(from) = board
        .columns
        .iter()
        .position(|column| column.contains(active_card_id))
    else {
        debug!(card = active_card_id, "active card not on board, ignoring move");
        return None;
    };

    let mut anchor = target.data.card_id.as_deref();
    let to = match target
        .data
        .column_id
        .as_deref()
        .and_then(|column_id| column_index(&board.columns, column_id))
        .or_else(|| column_index(&board.columns, &target.id))
    {
        Some(to) => to,
        None => {
            let Some(to) = board
                .columns
                .iter()
                .position(|column| column.contains(&target.id))
            else {
                debug!(drop_target = %target.id, "drop target resolves to no column");
                return None;
            };
            anchor = anchor.or(Some(target.id.as_str()));
            to
        }
    };

    let destination = &board.columns[to];
    let target_index = target
        .index()
        .or_else(|| anchor.and_then(|card_id| destination.position_of(card_id)))
        .unwrap_or(destination.cards.len());

    let from_index = board.columns[from].position_of(active_card_id)?;
    let mut columns = board.columns.clone();

    if from == to {
        let cards = &mut columns[to].cards;
        let target_index = target_index.min(cards.len() - 1);
        if target_index == from_index {
            debug!(card = active_card_id, "card already in place");
            return None;
        }
        let card = cards.remove(from_index);
        cards.insert(target_index, card);
    } else {
        let moving = columns[from].cards.remove(from_index);
        let cards = &mut columns[to].cards;

        let mut target_index = target_index;
        if let Some(existing) = cards.iter().position(|card| card.id == active_card_id) {
            cards.remove(existing);
            if existing < target_index {
                target_index -= 1;
            }
        }

        let target_index = target_index.min(cards.len());
        cards.insert(target_index, moving);
    }

    debug!(
        card = active_card_id,
        from = %board.columns[from].id,
        to = %board.columns[to].id,
        "card moved"
    );

    Some(Board {
        id: board.id.clone(),
        slug: board.slug.clone(),
        columns,
    })
}

fn column_index(columns: &[Column], column_id: &str) -> Option<usize> {
    columns.iter().position(|column| column.id == column_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Card;

    fn base_board() -> Board {
        Board::new(
            "board-1",
            "demo",
            vec![
                Column::new("col-todo", "Todo")
                    .with_cards(vec![Card::new("card-1", "A"), Card::new("card-2", "B")]),
                Column::new("col-doing", "Doing")
                    .with_cards(vec![Card::new("card-3", "C"), Card::new("card-4", "D")]),
            ],
        )
    }

    fn with_done(mut board: Board) -> Board {
        board.columns.push(Column::new("col-done", "Done"));
        board
    }

    fn card_ids<'a>(board: &'a Board, column_id: &str) -> Vec<&'a str> {
        board
            .column(column_id)
            .unwrap()
            .cards
            .iter()
            .map(|card| card.id.as_str())
            .collect()
    }

    #[test]
    fn test_clone_board_is_independent() {
        let board = base_board();
        let mut copied = clone_board(&board);
        assert_eq!(copied, board);

        copied.columns[0].name = "Updated".to_string();
        copied.columns[0].cards[0].title = "Changed".to_string();
        copied.columns[1].cards.clear();

        assert_eq!(board.columns[0].name, "Todo");
        assert_eq!(board.columns[0].cards[0].title, "A");
        assert_eq!(board.columns[1].cards.len(), 2);
    }

    #[test]
    fn test_reorders_within_same_column() {
        let board = base_board();
        let target = DropTarget::new("card-2")
            .in_column("col-todo")
            .anchored_to("card-2")
            .at_index(1);

        let result = move_card(&board, "card-1", &target).unwrap();

        assert_eq!(card_ids(&result, "col-todo"), vec!["card-2", "card-1"]);
        assert_eq!(card_ids(&board, "col-todo"), vec!["card-1", "card-2"]);
    }

    #[test]
    fn test_moves_card_to_empty_column() {
        let board = with_done(base_board());
        let target = DropTarget::new("col-done").in_column("col-done").at_index(0);

        let result = move_card(&board, "card-1", &target).unwrap();

        assert_eq!(card_ids(&result, "col-todo"), vec!["card-2"]);
        assert_eq!(card_ids(&result, "col-done"), vec!["card-1"]);
    }

    #[test]
    fn test_inserts_into_middle_of_other_column() {
        let board = base_board();
        let target = DropTarget::new("card-4")
            .in_column("col-doing")
            .anchored_to("card-4")
            .at_index(1);

        let result = move_card(&board, "card-1", &target).unwrap();

        assert_eq!(card_ids(&result, "col-todo"), vec!["card-2"]);
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-3", "card-1", "card-4"]
        );
    }

    #[test]
    fn test_missing_active_card_is_no_op() {
        let board = with_done(base_board());
        let targets = [
            DropTarget::new("col-todo").in_column("col-todo").at_index(0),
            DropTarget::new("card-3"),
            DropTarget::new("col-done"),
            DropTarget::new("nowhere"),
        ];
        for target in &targets {
            assert_eq!(move_card(&board, "unknown", target), None);
        }
    }

    #[test]
    fn test_dropping_on_own_position_is_no_op() {
        let board = base_board();

        let onto_self = DropTarget::new("card-1")
            .in_column("col-todo")
            .anchored_to("card-1")
            .at_index(0);
        assert_eq!(move_card(&board, "card-1", &onto_self), None);

        // raw card id only, index resolved from the card itself
        assert_eq!(move_card(&board, "card-2", &DropTarget::new("card-2")), None);
    }

    #[test]
    fn test_unresolvable_target_is_no_op() {
        let board = base_board();
        let target = DropTarget::new("ghost").in_column("ghost-column");
        assert_eq!(move_card(&board, "card-1", &target), None);
    }

    #[test]
    fn test_raw_column_id_appends() {
        let board = base_board();
        let result = move_card(&board, "card-1", &DropTarget::new("col-doing")).unwrap();
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-3", "card-4", "card-1"]
        );
    }

    #[test]
    fn test_raw_empty_column_id_inserts_first() {
        let board = with_done(base_board());
        let result = move_card(&board, "card-3", &DropTarget::new("col-done")).unwrap();
        assert_eq!(card_ids(&result, "col-done"), vec!["card-3"]);
        assert_eq!(card_ids(&result, "col-doing"), vec!["card-4"]);
    }

    #[test]
    fn test_raw_card_id_uses_anchor_position() {
        let board = base_board();
        let result = move_card(&board, "card-1", &DropTarget::new("card-4")).unwrap();
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-3", "card-1", "card-4"]
        );
    }

    #[test]
    fn test_unknown_explicit_column_falls_back_to_raw_id() {
        let board = base_board();
        let target = DropTarget::new("col-doing").in_column("deleted-column").at_index(0);
        let result = move_card(&board, "card-1", &target).unwrap();
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-1", "card-3", "card-4"]
        );
    }

    #[test]
    fn test_stale_anchor_appends() {
        let board = base_board();
        let target = DropTarget::new("col-doing")
            .in_column("col-doing")
            .anchored_to("card-gone");
        let result = move_card(&board, "card-1", &target).unwrap();
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-3", "card-4", "card-1"]
        );
    }

    #[test]
    fn test_negative_index_falls_back_to_anchor() {
        let board = base_board();
        let target = DropTarget::new("card-3")
            .in_column("col-doing")
            .anchored_to("card-3")
            .at_index(-1);
        let result = move_card(&board, "card-1", &target).unwrap();
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-1", "card-3", "card-4"]
        );
    }

    #[test]
    fn test_same_column_clamps_to_last_slot() {
        let board = base_board();
        let target = DropTarget::new("col-todo").in_column("col-todo").at_index(10);

        let result = move_card(&board, "card-1", &target).unwrap();
        assert_eq!(card_ids(&result, "col-todo"), vec!["card-2", "card-1"]);

        // the last card clamped onto its own slot
        assert_eq!(move_card(&board, "card-2", &target), None);
    }

    #[test]
    fn test_cross_column_clamps_to_length() {
        let board = base_board();
        let target = DropTarget::new("col-doing").in_column("col-doing").at_index(10);

        let result = move_card(&board, "card-2", &target).unwrap();
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-3", "card-4", "card-2"]
        );
    }

    #[test]
    fn test_stale_copy_in_destination_is_replaced() {
        let mut board = base_board();
        board.columns[1].cards.insert(1, Card::new("card-1", "A"));

        let target = DropTarget::new("col-doing").in_column("col-doing").at_index(3);
        let result = move_card(&board, "card-1", &target).unwrap();

        assert_eq!(card_ids(&result, "col-todo"), vec!["card-2"]);
        assert_eq!(
            card_ids(&result, "col-doing"),
            vec!["card-3", "card-4", "card-1"]
        );
    }

    #[test]
    fn test_card_count_is_invariant() {
        let board = with_done(base_board());
        let active_ids = ["card-1", "card-2", "card-3", "card-4"];
        let target_ids = [
            "col-todo", "col-doing", "col-done", "card-1", "card-2", "card-3", "card-4",
        ];

        for active in active_ids {
            for target_id in target_ids {
                for index in -1..=5 {
                    let targets = [
                        DropTarget::new(target_id),
                        DropTarget::new(target_id).at_index(index),
                    ];
                    for target in &targets {
                        let Some(next) = move_card(&board, active, target) else {
                            continue;
                        };
                        assert_eq!(next.card_count(), board.card_count());
                        assert_eq!(
                            next.columns.iter().filter(|c| c.contains(active)).count(),
                            1
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_column_reorder_keeps_cards() {
        let board = Board::new(
            "board-1",
            "demo",
            vec![Column::new("col", "Todo").with_cards(
                (1..=5)
                    .map(|n| Card::new(format!("card-{n}"), format!("Card {n}")))
                    .collect(),
            )],
        );

        for from in 1..=5 {
            for index in 0..6 {
                let target = DropTarget::new("col").in_column("col").at_index(index);
                let Some(next) = move_card(&board, &format!("card-{from}"), &target) else {
                    continue;
                };
                let mut before = card_ids(&board, "col");
                let mut after = card_ids(&next, "col");
                assert_ne!(before, after);
                before.sort_unstable();
                after.sort_unstable();
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_drop_target_from_drag_payload() {
        let target: DropTarget = serde_json::from_str(
            r#"{"id":"card-2","data":{"columnId":"col-todo","cardId":"card-2","sortable":{"index":1}}}"#,
        )
        .unwrap();
        assert_eq!(
            target,
            DropTarget::new("card-2")
                .in_column("col-todo")
                .anchored_to("card-2")
                .at_index(1)
        );

        let bare: DropTarget = serde_json::from_str(r#"{"id":"col-done"}"#).unwrap();
        assert_eq!(bare, DropTarget::new("col-done"));

        let no_index: DropTarget =
            serde_json::from_str(r#"{"id":"col-done","data":{"sortable":{}}}"#).unwrap();
        assert_eq!(no_index.index(), None);
    }
}
