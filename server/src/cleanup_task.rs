use std::time::Duration;

use common::log;

use crate::game_session_manager::GameSessionManager;

/// Drops sessions nobody has touched for `inactivity_timeout`.
pub struct CleanupTask {
    session_manager: GameSessionManager,
    check_interval: Duration,
    inactivity_timeout: Duration,
}

impl CleanupTask {
    pub fn new(
        session_manager: GameSessionManager,
        check_interval: Duration,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            session_manager,
            check_interval,
            inactivity_timeout,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            interval.tick().await;
            self.cleanup_inactive_sessions().await;
        }
    }

    async fn cleanup_inactive_sessions(&self) -> usize {
        let inactive_sessions = self
            .session_manager
            .get_inactive_sessions(self.inactivity_timeout)
            .await;

        let mut removed = 0;
        for session_id in inactive_sessions {
            log!("Cleaning up inactive session: {}", session_id);
            if self.session_manager.remove_session(&session_id).await {
                removed += 1;
            }
        }

        if removed > 0 {
            log!(
                "Removed {} inactive sessions, {} still active",
                removed,
                self.session_manager.session_count().await
            );
        }
        removed
    }
}
