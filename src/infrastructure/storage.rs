use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{BoardState, KanbanError};

/// Key under which the board snapshot is stored.
pub const STORAGE_KEY: &str = "appState";

/// String key/value storage backed by the `app_state` table.
#[derive(Clone, Debug)]
pub struct StateStore {
    pool: SqlitePool,
}

impl StateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, KanbanError> {
        let value: Option<(String,)> = sqlx::query_as("SELECT value FROM app_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value.map(|(v,)| v))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), KanbanError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO app_state (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<bool, KanbanError> {
        let result = sqlx::query("DELETE FROM app_state WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reads the stored board without touching storage. `None` when nothing
    /// is stored, `CorruptState` when the record cannot be used.
    pub async fn peek_board(
        &self,
        expected_columns: usize,
    ) -> Result<Option<BoardState>, KanbanError> {
        match self.get_item(STORAGE_KEY).await? {
            Some(raw) => parse_board(&raw, expected_columns).map(Some),
            None => Ok(None),
        }
    }

    /// Reads the stored board. A missing record yields `fallback`; so does an
    /// unreadable one, which is also removed from storage.
    pub async fn load_board(&self, fallback: BoardState) -> Result<BoardState, KanbanError> {
        match self.peek_board(fallback.columns.len()).await {
            Ok(Some(board)) => {
                tracing::info!(
                    cards = board.total_cards(),
                    locked = board.locked,
                    "Restored board from storage"
                );
                Ok(board)
            }
            Ok(None) => {
                tracing::debug!("No stored board, starting empty");
                Ok(fallback)
            }
            Err(KanbanError::CorruptState(reason)) => {
                tracing::warn!("Discarding stored board: {}", reason);
                self.remove_item(STORAGE_KEY).await?;
                Ok(fallback)
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrites the stored snapshot with `board`.
    pub async fn save_board(&self, board: &BoardState) -> Result<(), KanbanError> {
        let json = serde_json::to_string(board)?;
        self.set_item(STORAGE_KEY, &json).await
    }
}

fn parse_board(raw: &str, expected_columns: usize) -> Result<BoardState, KanbanError> {
    let board: BoardState = serde_json::from_str(raw)
        .map_err(|e| KanbanError::CorruptState(e.to_string()))?;
    board.validate_shape(expected_columns)?;
    Ok(board)
}
