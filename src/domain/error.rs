use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum KanbanError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("column '{column}' is at capacity")]
    CapacityExceeded { column: String },

    #[error("{0}")]
    InvalidTransition(String),

    #[error("persisted state is corrupt: {0}")]
    CorruptState(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KanbanError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            KanbanError::Validation(_) | KanbanError::InvalidTransition(_) => {
                StatusCode::BAD_REQUEST
            }
            KanbanError::NotFound(_) => StatusCode::NOT_FOUND,
            KanbanError::CapacityExceeded { .. } => StatusCode::CONFLICT,
            KanbanError::CorruptState(_)
            | KanbanError::Internal(_)
            | KanbanError::Database(_)
            | KanbanError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for KanbanError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            KanbanError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                "Internal server error".to_string()
            }
            KanbanError::Serialization(err) => {
                tracing::error!("Serialization error: {:?}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
