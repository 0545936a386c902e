pub mod board;
pub mod card;
pub mod checklist;
pub mod column;
pub mod error;
pub mod return_request;
pub mod stage;

pub use board::{BoardRules, BoardState, CompletionOutcome};
pub use card::{Card, CardDraft, CardFields, CardStatus};
pub use checklist::ChecklistItem;
pub use column::Column;
pub use error::KanbanError;
pub use return_request::PendingReturn;
pub use stage::Stage;
