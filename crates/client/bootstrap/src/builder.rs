//! Builds the game session and its collaborators for front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};

use client_stats_core::{PlayerId, StatsBackend};
use runtime::{Clock, FileProfileRepository, GameSession, ProfileRepository, SystemClock};

use crate::config::SessionConfig;

/// Builder that assembles the session, persistence, and backend wiring.
///
/// The statistics backend and player identity come from the login flow and
/// must be provided; persistence and the clock default to the file
/// repository under the configured data dir and the system clock.
pub struct SessionBuilder {
    config: SessionConfig,
    backend: Option<Arc<dyn StatsBackend>>,
    repository: Option<Arc<dyn ProfileRepository>>,
    clock: Arc<dyn Clock>,
    player_id: Option<PlayerId>,
}

impl SessionBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            backend: None,
            repository: None,
            clock: Arc::new(SystemClock),
            player_id: None,
        }
    }

    /// Provide the remote statistics backend (required).
    pub fn backend(mut self, backend: impl StatsBackend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Provide the backend-assigned player identity (required).
    pub fn player_id(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Override profile persistence (e.g., in-memory for tests).
    pub fn repository(mut self, repository: impl ProfileRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Override the clock (e.g., a manual clock for tests).
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Assembles the session and runs the startup reload (offline regen
    /// accrual plus remote bonus-cache refresh).
    pub async fn build(self) -> Result<GameSession> {
        let backend = self
            .backend
            .context("session requires a statistics backend before building")?;
        let player_id = self
            .player_id
            .context("session requires a player id before building")?;

        let repository = match self.repository {
            Some(repository) => repository,
            None => {
                let data_dir = self.config.resolve_data_dir();
                tracing::debug!("Using profile directory {}", data_dir.display());
                Arc::new(FileProfileRepository::new(&data_dir)?)
            }
        };

        let mut session = GameSession::new(
            self.config.game.clone(),
            self.clock,
            repository,
            backend,
            player_id,
        )?;
        session.reload().await?;

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_stats_core::MockStatsBackend;
    use game_core::LevelId;
    use runtime::{InMemoryProfileRepo, ManualClock};

    #[tokio::test]
    async fn missing_backend_is_rejected() {
        let result = SessionBuilder::new(SessionConfig::default())
            .player_id(PlayerId::from("me"))
            .build()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn builds_a_fresh_session_with_overrides() {
        let backend = MockStatsBackend::new();
        backend.seed_statistic("Bonus_Level_1", 33);

        let mut session = SessionBuilder::new(SessionConfig::default())
            .backend(backend)
            .player_id(PlayerId::from("me"))
            .repository(InMemoryProfileRepo::new())
            .clock(ManualClock::new(game_core::Timestamp::new(1_700_000_000)))
            .build()
            .await
            .unwrap();

        assert_eq!(session.current_energy().unwrap(), 5);
        assert_eq!(session.best_bonus_for(LevelId::new(1)), 33);
    }
}
