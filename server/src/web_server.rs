use std::path::PathBuf;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::api;
use crate::pages;
use crate::game_session_manager::GameSessionManager;

#[derive(Clone)]
pub struct WebServerState {
    pub session_manager: GameSessionManager,
}

/// Pages at `/` and `/game`, the JSON game API under `/api/game`; everything else
/// is served from `static_files_path`.
pub fn build_router(session_manager: GameSessionManager, static_files_path: PathBuf) -> Router {
    let state = WebServerState { session_manager };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::home))
        .route("/game", get(pages::game))
        .route("/api/game/new", post(api::new_game))
        .route("/api/game/{session_id}", delete(api::end_game))
        .route("/api/game/{session_id}/state", get(api::game_state))
        .route("/api/game/{session_id}/start", post(api::start_game))
        .route("/api/game/{session_id}/move", post(api::change_direction))
        .route("/api/game/{session_id}/update", post(api::update_game))
        .route("/api/game/{session_id}/restart", post(api::restart_game))
        .fallback_service(ServeDir::new(static_files_path))
        .layer(cors)
        .with_state(state)
}
