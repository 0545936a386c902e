use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::card::{Card, CardDraft, CardFields, CardStatus};
use crate::domain::checklist::{self, ChecklistProgress, MAX_CHECKLIST_ITEMS, MIN_CHECKLIST_ITEMS};
use crate::domain::column::Column;
use crate::domain::error::KanbanError;
use crate::domain::stage::Stage;

/// Rules for accepting new cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRules {
    /// Every new card must carry a checklist of `min_items..=max_items` items.
    pub require_checklist: bool,
    pub min_items: usize,
    pub max_items: usize,
}

impl Default for BoardRules {
    fn default() -> Self {
        Self {
            require_checklist: true,
            min_items: MIN_CHECKLIST_ITEMS,
            max_items: MAX_CHECKLIST_ITEMS,
        }
    }
}

impl BoardRules {
    fn check_item_count(&self, count: usize) -> Result<(), KanbanError> {
        if (self.min_items..=self.max_items).contains(&count) {
            Ok(())
        } else {
            Err(KanbanError::Validation(format!(
                "a card needs between {} and {} checklist items, got {}",
                self.min_items, self.max_items, count
            )))
        }
    }
}

/// What `check_completion` did to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Unchanged,
    /// Moved from the first column to the second.
    Promoted,
    /// Wanted to move to the second column but it was full.
    Locked,
    /// Moved to the terminal column. Holds the first-column cards that were
    /// promoted afterwards.
    Completed { promoted: Vec<Uuid> },
}

/// The whole board: ordered workflow columns plus the promotion lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub locked: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(Column::defaults(Some(3), Some(5)))
    }
}

impl BoardState {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            locked: false,
        }
    }

    pub fn column(&self, index: usize) -> Result<&Column, KanbanError> {
        self.columns
            .get(index)
            .ok_or_else(|| KanbanError::NotFound(format!("Column not found: {}", index)))
    }

    fn column_mut(&mut self, index: usize) -> Result<&mut Column, KanbanError> {
        self.columns
            .get_mut(index)
            .ok_or_else(|| KanbanError::NotFound(format!("Column not found: {}", index)))
    }

    pub fn card(&self, column_index: usize, card_index: usize) -> Result<&Card, KanbanError> {
        self.column(column_index)?
            .cards
            .get(card_index)
            .ok_or_else(|| card_not_found(column_index, card_index))
    }

    fn card_mut(&mut self, column_index: usize, card_index: usize) -> Result<&mut Card, KanbanError> {
        self.column_mut(column_index)?
            .cards
            .get_mut(card_index)
            .ok_or_else(|| card_not_found(column_index, card_index))
    }

    /// Returns `(column_index, card_index)` of a card.
    pub fn find_card(&self, card_id: Uuid) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(col, column)| column.position_of(card_id).map(|pos| (col, pos)))
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }

    /// Rejects a loaded board that cannot satisfy the engine's invariants.
    pub fn validate_shape(&self, expected_columns: usize) -> Result<(), KanbanError> {
        if self.columns.len() != expected_columns {
            return Err(KanbanError::CorruptState(format!(
                "expected {} columns, found {}",
                expected_columns,
                self.columns.len()
            )));
        }

        if let Some(column) = self.columns.iter().find(|c| c.max_cards == Some(0)) {
            return Err(KanbanError::CorruptState(format!(
                "column '{}' has a capacity of zero",
                column.name
            )));
        }

        if let Some(column) = self.columns.iter().find(|c| c.is_over_capacity()) {
            return Err(KanbanError::CorruptState(format!(
                "column '{}' holds more cards than it allows",
                column.name
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for card in self.columns.iter().flat_map(|c| c.cards.iter()) {
            if !seen.insert(card.id) {
                return Err(KanbanError::CorruptState(format!(
                    "card {} appears more than once",
                    card.id
                )));
            }
        }

        Ok(())
    }

    // ── Card CRUD ──────────────────────────────────────────────

    pub fn add_card(&mut self, draft: CardDraft, rules: &BoardRules) -> Result<&Card, KanbanError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(KanbanError::Validation("card title is required".into()));
        }

        let items = checklist::from_texts(&draft.items);
        if rules.require_checklist || !items.is_empty() {
            rules.check_item_count(items.len())?;
        }

        let first = self.column_mut(Stage::Planned.index())?;
        if first.is_full() {
            return Err(KanbanError::CapacityExceeded {
                column: first.name.clone(),
            });
        }

        first
            .cards
            .push(Card::new(title, draft.description, draft.deadline, items));
        first
            .cards
            .last()
            .ok_or_else(|| KanbanError::Internal("card vanished after insert".into()))
    }

    pub fn update_card(
        &mut self,
        column_index: usize,
        card_index: usize,
        fields: CardFields,
    ) -> Result<&Card, KanbanError> {
        if fields.title.trim().is_empty() {
            return Err(KanbanError::Validation("card title is required".into()));
        }

        let card = self.card_mut(column_index, card_index)?;
        card.apply(fields);
        Ok(card)
    }

    pub fn delete_card(&mut self, column_index: usize, card_index: usize) -> Result<Card, KanbanError> {
        let column = self.column_mut(column_index)?;
        if card_index >= column.cards.len() {
            return Err(card_not_found(column_index, card_index));
        }
        Ok(column.cards.remove(card_index))
    }

    pub fn clear_all_cards(&mut self) -> usize {
        let removed = self.total_cards();
        for column in &mut self.columns {
            column.cards.clear();
        }
        self.locked = false;
        removed
    }

    // ── Movement ───────────────────────────────────────────────

    /// Manual move between adjacent stages. Returning a card from review to
    /// work needs a non-blank `reason`, which is stored on the card.
    pub fn move_card(
        &mut self,
        card_id: Uuid,
        from: usize,
        to: usize,
        reason: Option<&str>,
    ) -> Result<(), KanbanError> {
        let from_stage = stage_at(from)?;
        let to_stage = stage_at(to)?;

        if self.column(from)?.position_of(card_id).is_none() {
            return Err(KanbanError::NotFound(format!(
                "Card {} is not in column {}",
                card_id, from
            )));
        }

        if !from_stage.can_transition_to(&to_stage) {
            return Err(KanbanError::InvalidTransition(
                from_stage.transition_error(&to_stage),
            ));
        }

        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        if from_stage.is_return(&to_stage) && reason.is_none() {
            return Err(KanbanError::Validation(
                "a reason is required to return a card to work".into(),
            ));
        }

        self.relocate(card_id, from, to, reason)
    }

    /// Moves a card without checking the stage chain. Capacity still applies.
    fn relocate(
        &mut self,
        card_id: Uuid,
        from: usize,
        to: usize,
        reason: Option<&str>,
    ) -> Result<(), KanbanError> {
        let position = self.column(from)?.position_of(card_id).ok_or_else(|| {
            KanbanError::NotFound(format!("Card {} is not in column {}", card_id, from))
        })?;

        let destination = self.column(to)?;
        if destination.is_full() {
            return Err(KanbanError::CapacityExceeded {
                column: destination.name.clone(),
            });
        }

        let mut card = self.column_mut(from)?.cards.remove(position);

        let from_stage = Stage::from_index(from);
        let to_stage = Stage::from_index(to);
        if from_stage == Some(Stage::Review) && to_stage == Some(Stage::InProgress) {
            card.return_reason = None;
        }
        if let Some(reason) = reason {
            card.return_reason = Some(reason.to_string());
        }
        if to_stage.is_some_and(|stage| stage.is_terminal()) {
            card.status = Some(CardStatus::from_deadline(
                card.deadline,
                Utc::now().date_naive(),
            ));
        }

        self.column_mut(to)?.cards.push(card);
        Ok(())
    }

    // ── Checklist gating ───────────────────────────────────────

    /// Promotes every partially done first-column card to the second column,
    /// in board order, until the second column is full. Does nothing while
    /// the board is locked.
    pub fn check_first_column_cards(&mut self) -> Result<Vec<Uuid>, KanbanError> {
        if self.locked {
            return Ok(Vec::new());
        }

        let candidates: Vec<Uuid> = self
            .column(Stage::Planned.index())?
            .cards
            .iter()
            .filter(|card| checklist::progress(&card.items) == ChecklistProgress::Partial)
            .map(|card| card.id)
            .collect();

        let mut promoted = Vec::new();
        for card_id in candidates {
            match self.relocate(
                card_id,
                Stage::Planned.index(),
                Stage::InProgress.index(),
                None,
            ) {
                Ok(()) => promoted.push(card_id),
                Err(KanbanError::CapacityExceeded { .. }) => break,
                Err(e) => return Err(e),
            }
        }

        Ok(promoted)
    }

    pub fn check_completion(&mut self, card_id: Uuid) -> Result<CompletionOutcome, KanbanError> {
        let (column_index, card_index) = self
            .find_card(card_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Card not found: {}", card_id)))?;
        let progress = checklist::progress(&self.card(column_index, card_index)?.items);

        match progress {
            ChecklistProgress::Complete => {
                let done = Stage::Done.index();
                if column_index != done {
                    self.relocate(card_id, column_index, done, None)?;
                }
                self.locked = false;
                let promoted = self.check_first_column_cards()?;
                Ok(CompletionOutcome::Completed { promoted })
            }
            ChecklistProgress::Partial if column_index == Stage::Planned.index() => {
                let next = Stage::InProgress.index();
                if self.column(next)?.is_full() {
                    self.locked = true;
                    Ok(CompletionOutcome::Locked)
                } else {
                    self.relocate(card_id, column_index, next, None)?;
                    Ok(CompletionOutcome::Promoted)
                }
            }
            _ => Ok(CompletionOutcome::Unchanged),
        }
    }

    /// Ticks or unticks one checklist item, then re-evaluates the card.
    pub fn set_item_completed(
        &mut self,
        column_index: usize,
        card_index: usize,
        item_index: usize,
        completed: bool,
    ) -> Result<(Uuid, CompletionOutcome), KanbanError> {
        let card = self.card_mut(column_index, card_index)?;
        let card_id = card.id;
        let item = card.items.get_mut(item_index).ok_or_else(|| {
            KanbanError::NotFound(format!(
                "Checklist item not found: {} on card {}",
                item_index, card_id
            ))
        })?;
        item.completed = completed;

        let outcome = self.check_completion(card_id)?;
        Ok((card_id, outcome))
    }
}

fn stage_at(index: usize) -> Result<Stage, KanbanError> {
    Stage::from_index(index)
        .ok_or_else(|| KanbanError::NotFound(format!("Column not found: {}", index)))
}

fn card_not_found(column_index: usize, card_index: usize) -> KanbanError {
    KanbanError::NotFound(format!(
        "Card not found at column {}, index {}",
        column_index, card_index
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn draft(title: &str) -> CardDraft {
        CardDraft {
            title: title.into(),
            description: format!("{title} description"),
            deadline: None,
            items: vec!["one".into(), "two".into(), "three".into(), "four".into()],
        }
    }

    fn board() -> BoardState {
        BoardState::new(Column::defaults(Some(3), Some(5)))
    }

    fn add(board: &mut BoardState, title: &str) -> Uuid {
        board.add_card(draft(title), &BoardRules::default()).unwrap().id
    }

    fn tick(board: &mut BoardState, card_id: Uuid, done: usize) {
        let (col, idx) = board.find_card(card_id).unwrap();
        let card = board.card_mut(col, idx).unwrap();
        for (i, item) in card.items.iter_mut().enumerate() {
            item.completed = i < done;
        }
    }

    fn place(board: &mut BoardState, column: usize, title: &str) -> Uuid {
        let card = Card::new(title, "", None, checklist::from_texts(["a", "b", "c", "d"]));
        let id = card.id;
        board.columns[column].cards.push(card);
        id
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[test]
    fn test_add_card_appends_to_first_column() {
        let mut board = board();
        let id = add(&mut board, "Write docs");

        assert_eq!(board.columns[0].cards.len(), 1);
        let card = &board.columns[0].cards[0];
        assert_eq!(card.id, id);
        assert_eq!(card.title, "Write docs");
        assert_eq!(card.items.len(), 4);
        assert!(card.last_edited_at.is_none());
    }

    #[test]
    fn test_add_card_rejects_blank_title() {
        let mut board = board();
        let err = board.add_card(draft("   "), &BoardRules::default()).unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
        assert_eq!(board.total_cards(), 0);
    }

    #[test]
    fn test_add_card_checklist_bounds() {
        let mut board = board();
        let rules = BoardRules::default();

        let mut too_few = draft("few");
        too_few.items = vec!["a".into(), "b".into(), "  ".into(), "".into()];
        assert!(matches!(
            board.add_card(too_few, &rules),
            Err(KanbanError::Validation(_))
        ));

        let mut too_many = draft("many");
        too_many.items = (0..6).map(|i| format!("item {i}")).collect();
        assert!(matches!(
            board.add_card(too_many, &rules),
            Err(KanbanError::Validation(_))
        ));

        let mut bounds = draft("three");
        bounds.items = vec!["a".into(), "b".into(), "c".into()];
        assert!(board.add_card(bounds, &rules).is_ok());
        assert_eq!(board.total_cards(), 1);
    }

    #[test]
    fn test_add_card_without_checklist_when_not_required() {
        let mut board = board();
        let rules = BoardRules {
            require_checklist: false,
            ..BoardRules::default()
        };

        let mut plain = draft("plain");
        plain.items.clear();
        assert!(board.add_card(plain, &rules).is_ok());

        let mut short = draft("short");
        short.items = vec!["only".into()];
        assert!(board.add_card(short, &rules).is_err());
    }

    #[test]
    fn test_fourth_card_rejected_when_first_column_full() {
        let mut board = board();
        for title in ["a", "b", "c"] {
            add(&mut board, title);
        }

        let err = board
            .add_card(draft("d"), &BoardRules::default())
            .unwrap_err();

        assert!(matches!(err, KanbanError::CapacityExceeded { .. }));
        assert_eq!(board.columns[0].cards.len(), 3);
    }

    #[test]
    fn test_update_card_overwrites_fields() {
        let mut board = board();
        add(&mut board, "Old");

        let card = board
            .update_card(
                0,
                0,
                CardFields {
                    title: "New".into(),
                    description: "changed".into(),
                    deadline: Some(today()),
                },
            )
            .unwrap();

        assert_eq!(card.title, "New");
        assert_eq!(card.description, "changed");
        assert!(card.last_edited_at.is_some());
    }

    #[test]
    fn test_update_card_out_of_range() {
        let mut board = board();
        add(&mut board, "Only");

        let fields = CardFields {
            title: "x".into(),
            ..CardFields::default()
        };
        assert!(matches!(
            board.update_card(0, 1, fields.clone()),
            Err(KanbanError::NotFound(_))
        ));
        assert!(matches!(
            board.update_card(9, 0, fields),
            Err(KanbanError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_then_delete_restores_column() {
        let mut board = board();
        add(&mut board, "keep");
        let before = board.columns[0].cards.clone();

        add(&mut board, "temp");
        let removed = board.delete_card(0, 1).unwrap();

        assert_eq!(removed.title, "temp");
        assert_eq!(board.columns[0].cards, before);
        assert!(matches!(board.delete_card(0, 5), Err(KanbanError::NotFound(_))));
    }

    #[test]
    fn test_move_forward() {
        let mut board = board();
        let id = add(&mut board, "task");

        board.move_card(id, 0, 1, None).unwrap();

        assert!(board.columns[0].cards.is_empty());
        assert_eq!(board.columns[1].cards[0].id, id);
    }

    #[test]
    fn test_move_requires_card_in_source() {
        let mut board = board();
        let id = add(&mut board, "task");

        let err = board.move_card(id, 1, 2, None).unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
        assert_eq!(board.columns[0].cards.len(), 1);
    }

    #[test]
    fn test_move_to_full_column_changes_nothing() {
        let mut board = BoardState::new(Column::defaults(Some(3), Some(1)));
        let blocker = add(&mut board, "blocker");
        board.move_card(blocker, 0, 1, None).unwrap();
        let id = add(&mut board, "waiting");
        let snapshot = board.clone();

        let err = board.move_card(id, 0, 1, None).unwrap_err();

        assert!(matches!(err, KanbanError::CapacityExceeded { .. }));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_move_skipping_stage_is_rejected() {
        let mut board = board();
        let id = add(&mut board, "task");

        let err = board.move_card(id, 0, 3, None).unwrap_err();
        assert!(matches!(err, KanbanError::InvalidTransition(_)));
        assert_eq!(board.columns[0].cards.len(), 1);
    }

    #[test]
    fn test_return_needs_reason() {
        let mut board = board();
        let id = place(&mut board, 2, "review me");

        let err = board.move_card(id, 2, 1, Some("   ")).unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
        assert_eq!(board.columns[2].cards.len(), 1);

        board.move_card(id, 2, 1, Some("needs more work")).unwrap();
        let card = &board.columns[1].cards[0];
        assert_eq!(card.return_reason.as_deref(), Some("needs more work"));
    }

    #[test]
    fn test_return_replaces_previous_reason() {
        let mut board = board();
        let id = place(&mut board, 2, "again");
        board.columns[2].cards[0].return_reason = Some("first".into());

        board.move_card(id, 2, 1, Some("second")).unwrap();

        assert_eq!(
            board.columns[1].cards[0].return_reason.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_done_with_past_deadline_is_overdue() {
        let mut board = board();
        let id = place(&mut board, 2, "late");
        board.columns[2].cards[0].deadline = Some(today() - Duration::days(3));

        board.move_card(id, 2, 3, None).unwrap();

        assert_eq!(board.columns[3].cards[0].status, Some(CardStatus::Overdue));
    }

    #[test]
    fn test_done_with_future_deadline_is_completed() {
        let mut board = board();
        let id = place(&mut board, 2, "early");
        board.columns[2].cards[0].deadline = Some(today() + Duration::days(3));

        board.move_card(id, 2, 3, None).unwrap();

        assert_eq!(board.columns[3].cards[0].status, Some(CardStatus::Completed));
    }

    #[test]
    fn test_partial_checklist_promotes_when_space() {
        let mut board = board();
        let id = add(&mut board, "three of four");
        tick(&mut board, id, 3);

        let outcome = board.check_completion(id).unwrap();

        assert_eq!(outcome, CompletionOutcome::Promoted);
        assert_eq!(board.find_card(id), Some((1, 0)));
        assert!(!board.locked);
    }

    #[test]
    fn test_partial_checklist_locks_when_second_column_full() {
        let mut board = board();
        for i in 0..5 {
            place(&mut board, 1, &format!("busy {i}"));
        }
        let id = add(&mut board, "three of four");
        tick(&mut board, id, 3);

        let outcome = board.check_completion(id).unwrap();

        assert_eq!(outcome, CompletionOutcome::Locked);
        assert!(board.locked);
        assert_eq!(board.find_card(id), Some((0, 0)));
        assert_eq!(board.columns[1].cards.len(), 5);
    }

    #[test]
    fn test_half_done_stays_put() {
        let mut board = board();
        let id = add(&mut board, "two of four");
        tick(&mut board, id, 2);

        assert_eq!(board.check_completion(id).unwrap(), CompletionOutcome::Unchanged);
        assert_eq!(board.find_card(id), Some((0, 0)));
    }

    #[test]
    fn test_completion_unlocks_and_promotes_waiting_card() {
        let mut board = board();
        let busy: Vec<Uuid> = (0..5).map(|i| place(&mut board, 1, &format!("busy {i}"))).collect();
        let waiting = add(&mut board, "waiting");
        tick(&mut board, waiting, 3);
        assert_eq!(board.check_completion(waiting).unwrap(), CompletionOutcome::Locked);

        tick(&mut board, busy[0], 4);
        let outcome = board.check_completion(busy[0]).unwrap();

        assert_eq!(
            outcome,
            CompletionOutcome::Completed {
                promoted: vec![waiting]
            }
        );
        assert!(!board.locked);
        assert_eq!(board.find_card(busy[0]), Some((3, 0)));
        assert_eq!(board.columns[3].cards[0].status, Some(CardStatus::Completed));
        assert_eq!(board.find_card(waiting).map(|(col, _)| col), Some(1));
        assert_eq!(board.columns[1].cards.len(), 5);
    }

    #[test]
    fn test_sweep_is_skipped_while_locked() {
        let mut board = board();
        let id = add(&mut board, "ready");
        tick(&mut board, id, 3);
        board.locked = true;

        assert!(board.check_first_column_cards().unwrap().is_empty());
        assert_eq!(board.find_card(id), Some((0, 0)));

        board.locked = false;
        assert_eq!(board.check_first_column_cards().unwrap(), vec![id]);
    }

    #[test]
    fn test_sweep_stops_at_capacity() {
        let mut board = BoardState::new(Column::defaults(Some(3), Some(1)));
        let first = add(&mut board, "first");
        let second = add(&mut board, "second");
        tick(&mut board, first, 3);
        tick(&mut board, second, 3);

        let promoted = board.check_first_column_cards().unwrap();

        assert_eq!(promoted, vec![first]);
        assert_eq!(board.find_card(second), Some((0, 0)));
        assert!(!board.locked);
    }

    #[test]
    fn test_set_item_completed_triggers_promotion() {
        let mut board = board();
        let id = add(&mut board, "tick me");

        for item in 0..2 {
            let (_, outcome) = board.set_item_completed(0, 0, item, true).unwrap();
            assert_eq!(outcome, CompletionOutcome::Unchanged);
        }
        let (card_id, outcome) = board.set_item_completed(0, 0, 2, true).unwrap();

        assert_eq!(card_id, id);
        assert_eq!(outcome, CompletionOutcome::Promoted);
        assert_eq!(board.find_card(id), Some((1, 0)));
        assert!(matches!(
            board.set_item_completed(1, 0, 10, true),
            Err(KanbanError::NotFound(_))
        ));
    }

    #[test]
    fn test_clear_all_cards() {
        let mut board = board();
        add(&mut board, "a");
        place(&mut board, 2, "b");
        board.locked = true;

        assert_eq!(board.clear_all_cards(), 2);
        assert_eq!(board.total_cards(), 0);
        assert!(!board.locked);
    }

    #[test]
    fn test_capacity_holds_across_operations() {
        let mut board = BoardState::new(Column::defaults(Some(3), Some(2)));
        let rules = BoardRules::default();
        for round in 0..6 {
            for i in 0..4 {
                let _ = board.add_card(draft(&format!("r{round} c{i}")), &rules);
            }
            let ids: Vec<Uuid> = board.columns[0].cards.iter().map(|c| c.id).collect();
            for id in ids {
                tick(&mut board, id, 3);
                let _ = board.check_completion(id);
            }
            if let Some(id) = board.columns[1].cards.first().map(|c| c.id) {
                let _ = board.move_card(id, 1, 2, None);
            }

            for column in &board.columns {
                assert!(!column.is_over_capacity(), "{} overflowed", column.name);
            }
        }
    }

    #[test]
    fn test_serde_round_trip_keeps_structure() {
        let mut board = board();
        let id = add(&mut board, "persist me");
        tick(&mut board, id, 1);
        place(&mut board, 2, "in review");
        board.columns[2].cards[0].return_reason = Some("typo".into());
        board.locked = true;

        let json = serde_json::to_string(&board).unwrap();
        let restored: BoardState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["columns"][0]["maxCards"], 3);
        assert!(value["columns"][2]["maxCards"].is_null());
        assert_eq!(value["locked"], true);
    }

    #[test]
    fn test_validate_shape() {
        let board = board();
        assert!(board.validate_shape(4).is_ok());
        assert!(matches!(
            board.validate_shape(3),
            Err(KanbanError::CorruptState(_))
        ));

        let mut crowded = BoardState::new(Column::defaults(Some(1), Some(5)));
        place(&mut crowded, 0, "a");
        place(&mut crowded, 0, "b");
        assert!(crowded.validate_shape(4).is_err());

        let mut closed = board.clone();
        closed.columns[2].max_cards = Some(0);
        assert!(matches!(
            closed.validate_shape(4),
            Err(KanbanError::CorruptState(_))
        ));

        let mut duplicated = board.clone();
        let id = place(&mut duplicated, 0, "twin");
        let twin = duplicated.columns[0].cards[0].clone();
        duplicated.columns[2].cards.push(twin);
        assert_eq!(duplicated.find_card(id), Some((0, 0)));
        assert!(duplicated.validate_shape(4).is_err());
    }
}
