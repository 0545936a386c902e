use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workflow stage of a column. The position of a column on the board is the
/// index of its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Planned,
    InProgress,
    Review,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Planned => "planned",
            Stage::InProgress => "in_progress",
            Stage::Review => "review",
            Stage::Done => "done",
        }
    }

    pub fn all() -> &'static [Stage] {
        &[Stage::Planned, Stage::InProgress, Stage::Review, Stage::Done]
    }

    pub fn index(&self) -> usize {
        match self {
            Stage::Planned => 0,
            Stage::InProgress => 1,
            Stage::Review => 2,
            Stage::Done => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Self::all().get(index).copied()
    }

    pub fn is_terminal(&self) -> bool {
        *self == Stage::Done
    }

    /// Manual moves go forward one stage at a time. The only way back is
    /// Review → InProgress, which needs a return reason.
    pub fn can_transition_to(&self, target: &Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Planned, InProgress) | (InProgress, Review) | (Review, Done) | (Review, InProgress)
        )
    }

    pub fn is_return(&self, target: &Stage) -> bool {
        *self == Stage::Review && *target == Stage::InProgress
    }

    pub fn transition_error(&self, target: &Stage) -> String {
        let allowed = self.allowed_next_stages();
        format!(
            "Invalid stage transition: {} → {}. Allowed transitions from {}: {}",
            self,
            target,
            self,
            if allowed.is_empty() {
                "none".to_string()
            } else {
                allowed.join(", ")
            }
        )
    }

    fn allowed_next_stages(&self) -> Vec<String> {
        Self::all()
            .iter()
            .filter(|s| self.can_transition_to(s))
            .map(|s| s.to_string())
            .collect()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Stage::Planned),
            "in_progress" => Ok(Stage::InProgress),
            "review" => Ok(Stage::Review),
            "done" => Ok(Stage::Done),
            _ => Err(format!("Invalid stage: {}", s)),
        }
    }
}
