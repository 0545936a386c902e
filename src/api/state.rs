use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::services::BoardService;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Mutex<BoardService>>,
    pub events: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(board: BoardService, events: broadcast::Sender<String>) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            events,
        }
    }
}
