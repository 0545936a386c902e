use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::dto::{CardResponse, ReturnConfirmRequest};
use crate::api::AppState;
use crate::domain::{KanbanError, PendingReturn};

pub async fn prompt_return(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PendingReturn>, KanbanError> {
    let pending = state.board.lock().await.prompt_return_to_work(id)?;
    Ok(Json(pending))
}

pub async fn confirm_return(
    State(state): State<AppState>,
    Json(req): Json<ReturnConfirmRequest>,
) -> Result<Json<CardResponse>, KanbanError> {
    let mut board = state.board.lock().await;
    let card = board.handle_return_confirm(&req.reason).await?;
    Ok(Json(CardResponse::locate(card, board.board())))
}

pub async fn cancel_return(State(state): State<AppState>) -> StatusCode {
    match state.board.lock().await.handle_return_cancel() {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
