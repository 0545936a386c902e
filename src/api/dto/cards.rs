use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BoardState, Card, CompletionOutcome, PendingReturn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    pub from_column: usize,
    pub to_column: usize,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReturnConfirmRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct SetItemRequest {
    pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    #[serde(flatten)]
    pub board: BoardState,
    pub total_cards: usize,
    pub pending_return: Option<PendingReturn>,
}

impl BoardResponse {
    pub fn new(board: &BoardState, pending_return: Option<&PendingReturn>) -> Self {
        Self {
            board: board.clone(),
            total_cards: board.total_cards(),
            pending_return: pending_return.cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    #[serde(flatten)]
    pub card: Card,
    pub column_index: usize,
    pub card_index: usize,
}

impl CardResponse {
    pub fn locate(card: Card, board: &BoardState) -> Self {
        let (column_index, card_index) = board.find_card(card.id).unwrap_or_default();
        Self {
            card,
            column_index,
            card_index,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionResponse {
    Unchanged,
    Promoted,
    Locked,
    Completed { promoted: Vec<Uuid> },
}

impl From<CompletionOutcome> for CompletionResponse {
    fn from(outcome: CompletionOutcome) -> Self {
        match outcome {
            CompletionOutcome::Unchanged => CompletionResponse::Unchanged,
            CompletionOutcome::Promoted => CompletionResponse::Promoted,
            CompletionOutcome::Locked => CompletionResponse::Locked,
            CompletionOutcome::Completed { promoted } => CompletionResponse::Completed { promoted },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PromotedResponse {
    pub promoted: Vec<Uuid>,
}
