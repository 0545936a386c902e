use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::checklist::ChecklistItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Overdue,
    Completed,
}

impl CardStatus {
    /// A card finished on its deadline day is still on time.
    pub fn from_deadline(deadline: Option<NaiveDate>, today: NaiveDate) -> Self {
        match deadline {
            Some(deadline) if deadline < today => CardStatus::Overdue,
            _ => CardStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ChecklistItem>,
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: Option<NaiveDate>,
        items: Vec<ChecklistItem>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            deadline,
            created_at: Utc::now(),
            last_edited_at: None,
            status: None,
            return_reason: None,
            items,
        }
    }

    pub fn apply(&mut self, fields: CardFields) {
        self.title = fields.title.trim().to_string();
        self.description = fields.description;
        self.deadline = fields.deadline;
        self.last_edited_at = Some(Utc::now());
    }

    pub fn completed_items(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }
}

/// What the card form submits when creating a card.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Editable fields of an existing card.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub deadline: Option<NaiveDate>,
}

// Date inputs submit "" when left empty.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
