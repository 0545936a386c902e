use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::card::Card;
use crate::domain::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    /// `None` means the column takes any number of cards.
    #[serde(default)]
    pub max_cards: Option<usize>,
}

impl Column {
    pub fn new(name: impl Into<String>, max_cards: Option<usize>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
            max_cards,
        }
    }

    /// The four workflow columns with the given capacities for the first two.
    pub fn defaults(planned_max: Option<usize>, in_progress_max: Option<usize>) -> Vec<Column> {
        Stage::all()
            .iter()
            .map(|stage| match stage {
                Stage::Planned => Column::new("Planned", planned_max),
                Stage::InProgress => Column::new("In Progress", in_progress_max),
                Stage::Review => Column::new("Review", None),
                Stage::Done => Column::new("Done", None),
            })
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.max_cards
            .is_some_and(|max| self.cards.len() >= max)
    }

    pub fn is_over_capacity(&self) -> bool {
        self.max_cards.is_some_and(|max| self.cards.len() > max)
    }

    pub fn position_of(&self, card_id: Uuid) -> Option<usize> {
        self.cards.iter().position(|card| card.id == card_id)
    }
}
