use axum::{extract::State, Json};

use crate::api::dto::{BoardResponse, PromotedResponse};
use crate::api::AppState;
use crate::domain::KanbanError;

pub async fn get_board(State(state): State<AppState>) -> Json<BoardResponse> {
    let board = state.board.lock().await;
    Json(BoardResponse::new(board.board(), board.pending_return()))
}

pub async fn clear_board(
    State(state): State<AppState>,
) -> Result<Json<BoardResponse>, KanbanError> {
    let mut board = state.board.lock().await;
    board.clear_all_cards().await?;
    Ok(Json(BoardResponse::new(board.board(), board.pending_return())))
}

pub async fn check_first_column(
    State(state): State<AppState>,
) -> Result<Json<PromotedResponse>, KanbanError> {
    let promoted = state.board.lock().await.check_first_column_cards().await?;
    Ok(Json(PromotedResponse { promoted }))
}
