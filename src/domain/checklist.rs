use serde::{Deserialize, Serialize};

/// A card in the first column moves on once strictly more than this share of
/// its checklist is done.
pub const PROMOTION_THRESHOLD_PERCENT: usize = 50;

/// Share of the checklist that counts as full completion.
pub const COMPLETION_PERCENT: usize = 100;

pub const MIN_CHECKLIST_ITEMS: usize = 3;
pub const MAX_CHECKLIST_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistProgress {
    /// No checklist at all.
    Empty,
    /// At most the promotion threshold is done.
    Started,
    /// Past the promotion threshold but not complete.
    Partial,
    Complete,
}

pub fn progress(items: &[ChecklistItem]) -> ChecklistProgress {
    let total = items.len();
    if total == 0 {
        return ChecklistProgress::Empty;
    }

    let done = items.iter().filter(|item| item.completed).count();
    // Compare percentages without dividing: done/total > p  <=>  done*100 > total*p
    if done * 100 >= total * COMPLETION_PERCENT {
        ChecklistProgress::Complete
    } else if done * 100 > total * PROMOTION_THRESHOLD_PERCENT {
        ChecklistProgress::Partial
    } else {
        ChecklistProgress::Started
    }
}

/// Trims item texts and drops blank ones.
pub fn from_texts<I, S>(texts: I) -> Vec<ChecklistItem>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .filter_map(|text| {
            let text = text.as_ref().trim();
            (!text.is_empty()).then(|| ChecklistItem::new(text))
        })
        .collect()
}
