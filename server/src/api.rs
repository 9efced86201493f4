use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use common::games::snake::{Direction, GameState, Point};
use common::{log, SessionId};

use crate::game_session_manager::{SessionError, SessionView};
use crate::web_server::WebServerState;

pub fn state_label(state: GameState) -> &'static str {
    match state {
        GameState::Ready => "ready",
        GameState::Playing => "playing",
        GameState::Paused => "paused",
        GameState::GameOver => "game_over",
    }
}

pub fn parse_direction(value: &str) -> Option<Direction> {
    match value.trim().to_ascii_lowercase().as_str() {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

fn point_to_wire(point: &Point) -> [i32; 2] {
    [point.x, point.y]
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub session_id: String,
    pub snake: Vec<[i32; 2]>,
    pub food: Option<[i32; 2]>,
    pub score: u32,
    pub high_score: u32,
    pub state: &'static str,
}

impl From<SessionView> for SnapshotResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.into(),
            snake: view.snapshot.snake.iter().map(point_to_wire).collect(),
            food: view.snapshot.food.as_ref().map(point_to_wire),
            score: view.snapshot.score,
            high_score: view.high_score,
            state: state_label(view.snapshot.state),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectionRequest {
    #[serde(default)]
    pub direction: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Invalid direction")]
    InvalidDirection,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::NoActiveGame(_)) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::TooManySessions(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Session(SessionError::InvalidConfiguration(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidDirection | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

/// Empty bodies fall back to `T::default()` so clients may POST without JSON.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

pub async fn new_game(
    State(state): State<WebServerState>,
    body: Bytes,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let request: NewGameRequest = parse_body(&body)?;
    let existing = request.session_id.map(SessionId::from);
    let view = state.session_manager.create_session(existing).await?;
    Ok(Json(view.into()))
}

pub async fn game_state(
    State(state): State<WebServerState>,
    Path(session_id): Path<String>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let view = state.session_manager.state(&SessionId::from(session_id)).await?;
    Ok(Json(view.into()))
}

pub async fn start_game(
    State(state): State<WebServerState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let game_state = state.session_manager.start(&SessionId::from(session_id)).await?;
    Ok(Json(json!({
        "success": true,
        "state": state_label(game_state),
    })))
}

pub async fn change_direction(
    State(state): State<WebServerState>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = SessionId::from(session_id);
    if !state.session_manager.contains(&session_id).await {
        return Err(SessionError::NoActiveGame(session_id).into());
    }

    let request: DirectionRequest = parse_body(&body)?;
    let Some(direction) = parse_direction(&request.direction) else {
        log!("Rejected direction {:?} for session {}", request.direction, session_id);
        return Err(ApiError::InvalidDirection);
    };

    state
        .session_manager
        .change_direction(&session_id, direction)
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn update_game(
    State(state): State<WebServerState>,
    Path(session_id): Path<String>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let view = state.session_manager.tick(&SessionId::from(session_id)).await?;
    Ok(Json(view.into()))
}

pub async fn restart_game(
    State(state): State<WebServerState>,
    Path(session_id): Path<String>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let view = state.session_manager.restart(&SessionId::from(session_id)).await?;
    Ok(Json(view.into()))
}

pub async fn end_game(
    State(state): State<WebServerState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = SessionId::from(session_id);
    if !state.session_manager.remove_session(&session_id).await {
        return Err(SessionError::NoActiveGame(session_id).into());
    }
    Ok(Json(json!({ "success": true })))
}
