use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::dto::{CardResponse, CompletionResponse, MoveCardRequest, SetItemRequest};
use crate::api::AppState;
use crate::domain::{CardDraft, CardFields, KanbanError};

pub async fn create_card(
    State(state): State<AppState>,
    Json(draft): Json<CardDraft>,
) -> Result<(StatusCode, Json<CardResponse>), KanbanError> {
    let mut board = state.board.lock().await;
    let card = board.add_card(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(CardResponse::locate(card, board.board())),
    ))
}

pub async fn update_card(
    State(state): State<AppState>,
    Path((column_index, card_index)): Path<(usize, usize)>,
    Json(fields): Json<CardFields>,
) -> Result<Json<CardResponse>, KanbanError> {
    let mut board = state.board.lock().await;
    let card = board.update_card(column_index, card_index, fields).await?;
    Ok(Json(CardResponse::locate(card, board.board())))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Path((column_index, card_index)): Path<(usize, usize)>,
) -> Result<StatusCode, KanbanError> {
    state
        .board
        .lock()
        .await
        .delete_card(column_index, card_index)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_item(
    State(state): State<AppState>,
    Path((column_index, card_index, item_index)): Path<(usize, usize, usize)>,
    Json(req): Json<SetItemRequest>,
) -> Result<Json<CompletionResponse>, KanbanError> {
    let outcome = state
        .board
        .lock()
        .await
        .set_item_completed(column_index, card_index, item_index, req.completed)
        .await?;
    Ok(Json(outcome.into()))
}

pub async fn move_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveCardRequest>,
) -> Result<Json<CardResponse>, KanbanError> {
    let mut board = state.board.lock().await;
    let card = board
        .move_card(id, req.from_column, req.to_column, req.reason.as_deref())
        .await?;
    Ok(Json(CardResponse::locate(card, board.board())))
}

pub async fn check_completion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompletionResponse>, KanbanError> {
    let outcome = state.board.lock().await.check_completion(id).await?;
    Ok(Json(outcome.into()))
}
