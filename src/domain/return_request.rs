use serde::Serialize;
use uuid::Uuid;

use crate::domain::board::BoardState;
use crate::domain::error::KanbanError;
use crate::domain::stage::Stage;

/// A review card waiting for the user to say why it goes back to work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReturn {
    pub card_id: Uuid,
    pub card_title: String,
}

impl BoardState {
    /// Opens the return dialog for a card sitting in the review column.
    pub fn prompt_return_to_work(&self, card_id: Uuid) -> Result<PendingReturn, KanbanError> {
        let review = self.column(Stage::Review.index())?;
        let card = review
            .cards
            .iter()
            .find(|card| card.id == card_id)
            .ok_or_else(|| {
                KanbanError::NotFound(format!("Card {} is not awaiting review", card_id))
            })?;

        Ok(PendingReturn {
            card_id,
            card_title: card.title.clone(),
        })
    }

    pub fn confirm_return(
        &mut self,
        pending: &PendingReturn,
        reason: &str,
    ) -> Result<(), KanbanError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(KanbanError::Validation(
                "a reason is required to return a card to work".into(),
            ));
        }

        self.move_card(
            pending.card_id,
            Stage::Review.index(),
            Stage::InProgress.index(),
            Some(reason),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Card;
    use crate::domain::column::Column;

    fn board_with_review_card() -> (BoardState, Uuid) {
        let mut board = BoardState::new(Column::defaults(Some(3), Some(5)));
        let card = Card::new("Login form", "", None, vec![]);
        let id = card.id;
        board.columns[Stage::Review.index()].cards.push(card);
        (board, id)
    }

    #[test]
    fn test_prompt_and_confirm() {
        let (mut board, id) = board_with_review_card();

        let pending = board.prompt_return_to_work(id).unwrap();
        assert_eq!(pending.card_title, "Login form");

        board.confirm_return(&pending, "needs more work").unwrap();

        let in_progress = &board.columns[Stage::InProgress.index()];
        assert_eq!(in_progress.cards[0].id, id);
        assert_eq!(
            in_progress.cards[0].return_reason.as_deref(),
            Some("needs more work")
        );
        assert!(board.columns[Stage::Review.index()].cards.is_empty());
    }

    #[test]
    fn test_prompt_rejects_card_outside_review() {
        let (mut board, id) = board_with_review_card();
        let other = Card::new("Elsewhere", "", None, vec![]);
        let other_id = other.id;
        board.columns[0].cards.push(other);

        assert!(board.prompt_return_to_work(other_id).is_err());
        assert!(board.prompt_return_to_work(Uuid::new_v4()).is_err());
        assert!(board.prompt_return_to_work(id).is_ok());
    }

    #[test]
    fn test_blank_reason_keeps_card_in_review() {
        let (mut board, id) = board_with_review_card();
        let pending = board.prompt_return_to_work(id).unwrap();

        let err = board.confirm_return(&pending, "  ").unwrap_err();

        assert!(matches!(err, KanbanError::Validation(_)));
        assert_eq!(board.find_card(id), Some((Stage::Review.index(), 0)));
    }
}
