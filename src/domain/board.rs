use crate::domain::id::IdGenerator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single work item on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
}

impl Card {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A named, ordered bucket of cards. Card order is display and drag order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Position of a card within this column
    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.position_of(card_id).is_some()
    }
}

/// Settings used when a board or column has to be synthesized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub default_columns: Vec<String>,
    pub new_column_name: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_columns: vec![
                "Todo".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
            new_column_name: "New Column".to_string(),
        }
    }
}

/// The full kanban document for one slug.
///
/// Operations consume the board and hand back the next value. Operating on an
/// unknown column or card id returns the board unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub slug: String,
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            columns,
        }
    }

    /// Creates a fresh board with one empty column per configured name
    pub fn initial(slug: &str, config: &BoardConfig, ids: &dyn IdGenerator) -> Self {
        let id = ids.next_id();
        let columns = config
            .default_columns
            .iter()
            .map(|name| Column::new(ids.next_id(), name.clone()))
            .collect();
        Self::new(id, slug, columns)
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    /// Gets the column currently holding a card
    pub fn column_of_card(&self, card_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.contains(card_id))
    }

    pub fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .find(|card| card.id == card_id)
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }

    /// Appends an empty column named after `config.new_column_name`
    pub fn add_column(mut self, config: &BoardConfig, ids: &dyn IdGenerator) -> Self {
        let column = Column::new(ids.next_id(), config.new_column_name.clone());
        debug!(board = %self.slug, column = %column.id, "adding column");
        self.columns.push(column);
        self
    }

    pub fn rename_column(mut self, column_id: &str, name: impl Into<String>) -> Self {
        if let Some(column) = self.column_mut(column_id) {
            column.name = name.into();
        }
        self
    }

    /// Removes a column together with its cards
    pub fn delete_column(mut self, column_id: &str) -> Self {
        self.columns.retain(|column| column.id != column_id);
        self
    }

    /// Appends a new card to the end of a column
    pub fn add_card(
        mut self,
        column_id: &str,
        title: impl Into<String>,
        ids: &dyn IdGenerator,
    ) -> Self {
        if let Some(column) = self.column_mut(column_id) {
            column.cards.push(Card::new(ids.next_id(), title));
        }
        self
    }

    pub fn edit_card(mut self, card_id: &str, column_id: &str, title: impl Into<String>) -> Self {
        if let Some(card) = self
            .column_mut(column_id)
            .and_then(|column| column.cards.iter_mut().find(|card| card.id == card_id))
        {
            card.title = title.into();
        }
        self
    }

    pub fn delete_card(mut self, card_id: &str, column_id: &str) -> Self {
        if let Some(column) = self.column_mut(column_id) {
            column.cards.retain(|card| card.id != card_id);
        }
        self
    }

    /// Moves a card to the end of another column.
    ///
    /// Nothing changes when both columns are the same, either column is
    /// missing, or the card is not in `from_column_id`.
    pub fn move_card_to_column(
        mut self,
        card_id: &str,
        from_column_id: &str,
        to_column_id: &str,
    ) -> Self {
        if from_column_id == to_column_id || self.column(to_column_id).is_none() {
            return self;
        }

        let Some(card) = self.column_mut(from_column_id).and_then(|column| {
            let index = column.position_of(card_id)?;
            Some(column.cards.remove(index))
        }) else {
            return self;
        };

        if let Some(column) = self.column_mut(to_column_id) {
            column.cards.push(card);
        }
        self
    }

    fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == column_id)
    }
}
