use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

use common::games::snake::{Direction, EngineError, GameSnapshot, GameState, SnakeGame};
use common::id_generator::generate_session_id;
use common::{log, SessionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub grid_width: i32,
    pub grid_height: i32,
    pub max_sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No active game")]
    NoActiveGame(SessionId),
    #[error("Too many active games (limit {0})")]
    TooManySessions(usize),
    #[error(transparent)]
    InvalidConfiguration(#[from] EngineError),
}

/// What the transport needs to answer a request about one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub session_id: SessionId,
    pub snapshot: GameSnapshot,
    pub high_score: u32,
}

struct GameSession {
    engine: SnakeGame,
    high_score: u32,
    last_activity: Instant,
}

impl GameSession {
    fn new(engine: SnakeGame) -> Self {
        Self {
            engine,
            high_score: 0,
            last_activity: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn record_score(&mut self) {
        self.high_score = self.high_score.max(self.engine.score());
    }

    fn view(&self, session_id: &SessionId) -> SessionView {
        SessionView {
            session_id: session_id.clone(),
            snapshot: self.engine.snapshot(),
            high_score: self.high_score,
        }
    }
}

/// One independent engine per session id. The mutex serialises every
/// engine call, so no two requests ever touch the same game at once.
#[derive(Clone)]
pub struct GameSessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    settings: SessionSettings,
}

impl GameSessionManager {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            settings,
        }
    }

    fn new_engine(&self) -> Result<SnakeGame, SessionError> {
        Ok(SnakeGame::new(self.settings.grid_width, self.settings.grid_height)?)
    }

    /// Starts a new game. A known `existing` id gets its engine replaced and keeps
    /// its high score; otherwise a fresh session is created under a generated id.
    pub async fn create_session(
        &self,
        existing: Option<SessionId>,
    ) -> Result<SessionView, SessionError> {
        let engine = self.new_engine()?;
        let mut sessions = self.sessions.lock().await;

        if let Some(session_id) = existing
            && let Some(session) = sessions.get_mut(&session_id)
        {
            session.engine = engine;
            session.touch();
            log!("New game in existing session {}", session_id);
            return Ok(session.view(&session_id));
        }

        if sessions.len() >= self.settings.max_sessions {
            return Err(SessionError::TooManySessions(self.settings.max_sessions));
        }

        let session_id = generate_session_id();
        let session = GameSession::new(engine);
        let view = session.view(&session_id);
        sessions.insert(session_id.clone(), session);
        log!("Game session created: {} ({} active)", session_id, sessions.len());
        Ok(view)
    }

    async fn with_session<T>(
        &self,
        session_id: &SessionId,
        action: impl FnOnce(&mut GameSession) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NoActiveGame(session_id.clone()))?;
        session.touch();
        Ok(action(session))
    }

    pub async fn state(&self, session_id: &SessionId) -> Result<SessionView, SessionError> {
        self.with_session(session_id, |session| session.view(session_id))
            .await
    }

    pub async fn start(&self, session_id: &SessionId) -> Result<GameState, SessionError> {
        self.with_session(session_id, |session| {
            session.engine.start();
            session.engine.state()
        })
        .await
    }

    pub async fn change_direction(
        &self,
        session_id: &SessionId,
        direction: Direction,
    ) -> Result<Direction, SessionError> {
        self.with_session(session_id, |session| {
            session.engine.change_direction(direction);
            session.engine.direction()
        })
        .await
    }

    /// One tick: move then collide, only while the game is being played.
    pub async fn tick(&self, session_id: &SessionId) -> Result<SessionView, SessionError> {
        self.with_session(session_id, |session| {
            if session.engine.state() == GameState::Playing {
                session.engine.move_snake();
                session.engine.update();
                session.record_score();
                if session.engine.state() == GameState::GameOver {
                    log!(
                        "Session {} game over, score {}, best {}",
                        session_id,
                        session.engine.score(),
                        session.high_score
                    );
                }
            }
            session.view(session_id)
        })
        .await
    }

    pub async fn restart(&self, session_id: &SessionId) -> Result<SessionView, SessionError> {
        self.with_session(session_id, |session| {
            session.engine.restart();
            session.view(session_id)
        })
        .await
    }

    pub async fn remove_session(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(session_id).is_some();
        if removed {
            log!("Game session removed: {}", session_id);
        }
        removed
    }

    pub async fn get_inactive_sessions(&self, timeout: Duration) -> Vec<SessionId> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .filter(|(_, session)| session.last_activity.elapsed() >= timeout)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub async fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.lock().await.contains_key(session_id)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
