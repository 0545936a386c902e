use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use uuid::Uuid;

use crate::api::AppState;

/// Change notifications; the front-end refetches the board when it sees one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    #[serde(rename_all = "camelCase")]
    CardAdded { card_id: Uuid, title: String },
    #[serde(rename_all = "camelCase")]
    CardUpdated { card_id: Uuid },
    #[serde(rename_all = "camelCase")]
    CardDeleted { card_id: Uuid },
    #[serde(rename_all = "camelCase")]
    CardMoved {
        card_id: Uuid,
        from_column: usize,
        to_column: usize,
    },
    #[serde(rename_all = "camelCase")]
    ChecklistItemToggled {
        card_id: Uuid,
        item_index: usize,
        completed: bool,
    },
    #[serde(rename_all = "camelCase")]
    CardsPromoted { card_ids: Vec<Uuid> },
    #[serde(rename_all = "camelCase")]
    ReturnRequested { card_id: Uuid },
    #[serde(rename_all = "camelCase")]
    ReturnCancelled { card_id: Uuid },
    LockChanged { locked: bool },
    BoardCleared { removed: usize },
}

pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(event_json) => Some(Ok(Event::default().data(event_json))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(event_stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
