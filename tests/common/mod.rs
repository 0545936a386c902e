use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tower::ServiceExt;

use kanban_board::api::{create_router, AppState};
use kanban_board::config::Config;
use kanban_board::infrastructure::{db, StateStore};
use kanban_board::services::BoardService;

pub fn test_config() -> Config {
    Config {
        port: 3000,
        database_url: "sqlite::memory:".to_string(),
        frontend_dir: "../frontend/dist".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        require_checklist: true,
        planned_max_cards: Some(3),
        in_progress_max_cards: Some(5),
    }
}

pub async fn setup_test_db() -> SqlitePool {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

pub async fn build_app(pool: SqlitePool, config: Config) -> (Router, broadcast::Receiver<String>) {
    let (events, rx) = broadcast::channel(100);
    let service = BoardService::load(
        StateStore::new(pool),
        config.board_layout(),
        config.board_rules(),
        events.clone(),
    )
    .await
    .expect("Failed to load board");

    let state = AppState::new(service, events);
    (create_router(state, &config), rx)
}

pub async fn setup_app() -> Router {
    let pool = setup_test_db().await;
    build_app(pool, test_config()).await.0
}

pub async fn make_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri).method(method);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }

    let request = request
        .body(Body::from(body.unwrap_or_default()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}

pub fn card_body(title: &str) -> String {
    serde_json::json!({
        "title": title,
        "description": format!("{title} description"),
        "deadline": "",
        "items": ["design", "build", "test", "ship"]
    })
    .to_string()
}

/// Creates a card and returns its id.
pub async fn create_card(app: &Router, title: &str) -> String {
    let (status, body) =
        make_request(app.clone(), "POST", "/api/cards", Some(card_body(title))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let card: serde_json::Value = serde_json::from_str(&body).unwrap();
    card["id"].as_str().unwrap().to_string()
}

pub async fn move_card(app: &Router, id: &str, from: usize, to: usize) -> StatusCode {
    let body = serde_json::json!({ "fromColumn": from, "toColumn": to }).to_string();
    make_request(app.clone(), "POST", &format!("/api/cards/{id}/move"), Some(body))
        .await
        .0
}

pub async fn get_board(app: &Router) -> serde_json::Value {
    let (status, body) = make_request(app.clone(), "GET", "/api/board", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}
