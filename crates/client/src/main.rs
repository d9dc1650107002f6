//! Wordtrail game client binary.
//!
//! Composition root that assembles configuration, persistence, and the
//! statistics backend into a [`runtime::GameSession`], then runs a short
//! headless smoke loop: one attempt on the frontier level, settled against
//! the backend.
//!
//! Login and backend selection are owned by the embedding UI shell; this
//! binary drives the in-memory backend so the full attempt lifecycle can be
//! exercised without network access.

use anyhow::Result;

use client_bootstrap::{SessionBuilder, SessionConfig, init_tracing};
use client_stats_core::{LeaderboardEntry, MockStatsBackend, PlayerId, bonus_stat_name};
use game_core::LevelId;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = SessionConfig::from_env();
    let player_id = PlayerId::from("demo-player");

    let backend = MockStatsBackend::new();
    backend.seed_leaderboard(
        bonus_stat_name(LevelId::FIRST),
        vec![
            LeaderboardEntry {
                player: player_id.clone(),
                position: 0,
            },
            LeaderboardEntry {
                player: PlayerId::from("rival"),
                position: 1,
            },
        ],
    );

    let mut session = SessionBuilder::new(config)
        .backend(backend)
        .player_id(player_id)
        .build()
        .await?;

    let frontier = session.current_unlocked_level();
    let energy = session.current_energy()?;
    tracing::info!(
        "Session ready: energy {}/{}, frontier {}",
        energy,
        session.energy_capacity(),
        frontier
    );

    session.start_attempt(frontier)?;
    loop {
        let progress = session.record_word_found()?;
        tracing::debug!("Found word {} of the target", progress.words_found);
        if progress.target_reached {
            break;
        }
    }

    let outcome = session.finish_attempt().await?;
    tracing::info!(
        "Cleared {}: bonus {}, first clear {}, tier {}",
        frontier,
        outcome.bonus,
        outcome.first_clear,
        outcome.rank_tier.as_str()
    );

    Ok(())
}
