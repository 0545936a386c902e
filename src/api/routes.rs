use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::config::Config;

pub fn create_router(state: AppState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origin
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let board_routes = Router::new()
        .route(
            "/",
            get(handlers::board::get_board).delete(handlers::board::clear_board),
        )
        .route(
            "/check-first-column",
            post(handlers::board::check_first_column),
        );

    let card_routes = Router::new()
        .route("/", post(handlers::cards::create_card))
        .route("/{id}/move", post(handlers::cards::move_card))
        .route(
            "/{id}/check-completion",
            post(handlers::cards::check_completion),
        )
        .route("/{id}/return", post(handlers::returns::prompt_return));

    let column_routes = Router::new()
        .route(
            "/{column}/cards/{index}",
            patch(handlers::cards::update_card).delete(handlers::cards::delete_card),
        )
        .route(
            "/{column}/cards/{index}/items/{item}",
            patch(handlers::cards::set_item),
        );

    let return_routes = Router::new()
        .route("/confirm", post(handlers::returns::confirm_return))
        .route("/cancel", post(handlers::returns::cancel_return));

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::liveness))
        .route("/api/events", get(handlers::sse::sse_handler))
        .nest("/api/board", board_routes)
        .nest("/api/cards", card_routes)
        .nest("/api/columns", column_routes)
        .nest("/api/return", return_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let serve_dir = ServeDir::new(&config.frontend_dir).not_found_service(
        ServeDir::new(&config.frontend_dir).append_index_html_on_directories(true),
    );

    api_routes.fallback_service(serve_dir)
}
