use tokio::sync::broadcast;
use uuid::Uuid;

use crate::api::handlers::sse::BoardEvent;
use crate::domain::{
    BoardRules, BoardState, Card, CardDraft, CardFields, CompletionOutcome, KanbanError,
    PendingReturn, Stage,
};
use crate::infrastructure::StateStore;

/// Owns the board. Every successful mutation is written to the store as a
/// full snapshot and announced on the event channel; failed ones touch
/// neither.
pub struct BoardService {
    board: BoardState,
    rules: BoardRules,
    store: StateStore,
    pending_return: Option<PendingReturn>,
    events: broadcast::Sender<String>,
}

impl BoardService {
    /// Restores the board from `store`, falling back to `layout` when nothing
    /// usable is stored.
    pub async fn load(
        store: StateStore,
        layout: BoardState,
        rules: BoardRules,
        events: broadcast::Sender<String>,
    ) -> Result<Self, KanbanError> {
        let board = store.load_board(layout).await?;

        Ok(Self {
            board,
            rules,
            store,
            pending_return: None,
            events,
        })
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn rules(&self) -> &BoardRules {
        &self.rules
    }

    pub fn pending_return(&self) -> Option<&PendingReturn> {
        self.pending_return.as_ref()
    }

    // ── Card CRUD ──────────────────────────────────────────────

    pub async fn add_card(&mut self, draft: CardDraft) -> Result<Card, KanbanError> {
        let card = self.board.add_card(draft, &self.rules)?.clone();
        tracing::info!(card_id = %card.id, title = card.title.as_str(), "Card added");

        self.commit(vec![BoardEvent::CardAdded {
            card_id: card.id,
            title: card.title.clone(),
        }])
        .await?;

        Ok(card)
    }

    pub async fn update_card(
        &mut self,
        column_index: usize,
        card_index: usize,
        fields: CardFields,
    ) -> Result<Card, KanbanError> {
        let card = self
            .board
            .update_card(column_index, card_index, fields)?
            .clone();
        tracing::debug!(card_id = %card.id, "Card updated");

        self.commit(vec![BoardEvent::CardUpdated { card_id: card.id }])
            .await?;

        Ok(card)
    }

    pub async fn delete_card(
        &mut self,
        column_index: usize,
        card_index: usize,
    ) -> Result<Card, KanbanError> {
        let card = self.board.delete_card(column_index, card_index)?;
        tracing::info!(card_id = %card.id, column = column_index, "Card deleted");

        self.commit(vec![BoardEvent::CardDeleted { card_id: card.id }])
            .await?;

        Ok(card)
    }

    pub async fn clear_all_cards(&mut self) -> Result<usize, KanbanError> {
        let was_locked = self.board.locked;
        let removed = self.board.clear_all_cards();
        self.pending_return = None;
        tracing::info!(removed, "Board cleared");

        let mut events = vec![BoardEvent::BoardCleared { removed }];
        if was_locked {
            events.push(BoardEvent::LockChanged { locked: false });
        }
        self.commit(events).await?;

        Ok(removed)
    }

    // ── Movement ───────────────────────────────────────────────

    pub async fn move_card(
        &mut self,
        card_id: Uuid,
        from: usize,
        to: usize,
        reason: Option<&str>,
    ) -> Result<Card, KanbanError> {
        if let Err(e) = self.board.move_card(card_id, from, to, reason) {
            tracing::debug!(card_id = %card_id, from, to, "Move rejected: {}", e);
            return Err(e);
        }
        tracing::info!(card_id = %card_id, from, to, "Card moved");

        self.commit(vec![BoardEvent::CardMoved {
            card_id,
            from_column: from,
            to_column: to,
        }])
        .await?;

        self.card_by_id(card_id)
    }

    pub fn prompt_return_to_work(&mut self, card_id: Uuid) -> Result<PendingReturn, KanbanError> {
        let pending = self.board.prompt_return_to_work(card_id)?;
        self.pending_return = Some(pending.clone());
        self.publish(BoardEvent::ReturnRequested { card_id });
        Ok(pending)
    }

    /// Executes the pending return with `reason`. The dialog stays open when
    /// the reason is rejected.
    pub async fn handle_return_confirm(&mut self, reason: &str) -> Result<Card, KanbanError> {
        let pending = self.pending_return.clone().ok_or_else(|| {
            KanbanError::Validation("no card is waiting to be returned to work".into())
        })?;

        self.board.confirm_return(&pending, reason)?;
        self.pending_return = None;
        tracing::info!(card_id = %pending.card_id, "Card returned to work");

        self.commit(vec![BoardEvent::CardMoved {
            card_id: pending.card_id,
            from_column: Stage::Review.index(),
            to_column: Stage::InProgress.index(),
        }])
        .await?;

        self.card_by_id(pending.card_id)
    }

    pub fn handle_return_cancel(&mut self) -> Option<PendingReturn> {
        let pending = self.pending_return.take();
        if let Some(p) = &pending {
            tracing::debug!(card_id = %p.card_id, "Return cancelled");
            self.publish(BoardEvent::ReturnCancelled { card_id: p.card_id });
        }
        pending
    }

    // ── Checklist gating ───────────────────────────────────────

    pub async fn check_first_column_cards(&mut self) -> Result<Vec<Uuid>, KanbanError> {
        let promoted = self.board.check_first_column_cards()?;
        if promoted.is_empty() {
            return Ok(promoted);
        }

        tracing::info!(count = promoted.len(), "Promoted first-column cards");
        self.commit(vec![BoardEvent::CardsPromoted {
            card_ids: promoted.clone(),
        }])
        .await?;

        Ok(promoted)
    }

    pub async fn check_completion(
        &mut self,
        card_id: Uuid,
    ) -> Result<CompletionOutcome, KanbanError> {
        let (from, _) = self
            .board
            .find_card(card_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Card not found: {}", card_id)))?;
        let was_locked = self.board.locked;

        let outcome = self.board.check_completion(card_id)?;
        let events = self.outcome_events(card_id, from, &outcome, was_locked);
        if !events.is_empty() {
            self.commit(events).await?;
        }

        Ok(outcome)
    }

    pub async fn set_item_completed(
        &mut self,
        column_index: usize,
        card_index: usize,
        item_index: usize,
        completed: bool,
    ) -> Result<CompletionOutcome, KanbanError> {
        let was_locked = self.board.locked;
        let (card_id, outcome) =
            self.board
                .set_item_completed(column_index, card_index, item_index, completed)?;
        tracing::debug!(card_id = %card_id, item_index, completed, ?outcome, "Checklist item set");

        let mut events = vec![BoardEvent::ChecklistItemToggled {
            card_id,
            item_index,
            completed,
        }];
        events.extend(self.outcome_events(card_id, column_index, &outcome, was_locked));
        self.commit(events).await?;

        Ok(outcome)
    }

    fn outcome_events(
        &self,
        card_id: Uuid,
        from: usize,
        outcome: &CompletionOutcome,
        was_locked: bool,
    ) -> Vec<BoardEvent> {
        let mut events = Vec::new();

        match outcome {
            CompletionOutcome::Unchanged | CompletionOutcome::Locked => {}
            CompletionOutcome::Promoted => events.push(BoardEvent::CardMoved {
                card_id,
                from_column: from,
                to_column: Stage::InProgress.index(),
            }),
            CompletionOutcome::Completed { promoted } => {
                if from != Stage::Done.index() {
                    events.push(BoardEvent::CardMoved {
                        card_id,
                        from_column: from,
                        to_column: Stage::Done.index(),
                    });
                }
                if !promoted.is_empty() {
                    events.push(BoardEvent::CardsPromoted {
                        card_ids: promoted.clone(),
                    });
                }
            }
        }

        if was_locked != self.board.locked {
            tracing::info!(locked = self.board.locked, "Board lock changed");
            events.push(BoardEvent::LockChanged {
                locked: self.board.locked,
            });
        }

        events
    }

    fn card_by_id(&self, card_id: Uuid) -> Result<Card, KanbanError> {
        let (column_index, card_index) = self
            .board
            .find_card(card_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Card not found: {}", card_id)))?;
        Ok(self.board.card(column_index, card_index)?.clone())
    }

    /// Closes the return dialog once its card has left the Review column,
    /// whichever operation moved or removed it.
    fn drop_stale_pending(&mut self) -> Option<BoardEvent> {
        let pending = self.pending_return.as_ref()?;
        let in_review = self
            .board
            .find_card(pending.card_id)
            .is_some_and(|(column, _)| column == Stage::Review.index());
        if in_review {
            return None;
        }

        let card_id = pending.card_id;
        self.pending_return = None;
        tracing::debug!(card_id = %card_id, "Return dialog closed, card left review");
        Some(BoardEvent::ReturnCancelled { card_id })
    }

    async fn commit(&mut self, mut events: Vec<BoardEvent>) -> Result<(), KanbanError> {
        events.extend(self.drop_stale_pending());
        self.store.save_board(&self.board).await?;
        for event in events {
            self.publish(event);
        }
        Ok(())
    }

    fn publish(&self, event: BoardEvent) {
        if let Ok(payload) = serde_json::to_string(&event) {
            let _ = self.events.send(payload);
        }
    }
}
