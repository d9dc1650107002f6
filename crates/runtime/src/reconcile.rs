//! Reward reconciliation against the remote statistics store.
//!
//! Settlement of a finished attempt runs in two phases:
//!
//! 1. [`RewardReconciler::settle_local`] (synchronous) computes the bonus,
//!    advances the unlock frontier on a first clear, and decides whether
//!    the result should be pushed. Callers persist the profile between the
//!    phases, so local state is durable before the first network call.
//! 2. [`RewardReconciler::settle_remote`] (asynchronous) pushes the bonus
//!    and queries the leaderboard rank. Remote failure is absorbed here;
//!    it can defer convergence but never corrupt local state.

use std::collections::HashMap;
use std::sync::Arc;

use client_stats_core::{
    PlayerId, StatsBackend, TOTAL_BONUS_STAT, bonus_stat_name, parse_bonus_stat,
};
use game_core::{
    AttemptResult, LevelId, ProgressionError, ProgressionTracker, RankTier, time_bonus,
};

/// Leaderboard window size requested around the player.
const LEADERBOARD_WINDOW: u32 = 10;

/// Locally-settled attempt: everything decided before touching the network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalSettlement {
    pub level: LevelId,
    pub bonus: u32,
    pub first_clear: bool,
    pub should_push: bool,
}

/// Final outcome of reconciling one attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconcileOutcome {
    pub bonus: u32,
    pub first_clear: bool,
    pub should_push: bool,
    pub rank_tier: RankTier,
}

/// Decides, per finished attempt, whether progression advances and whether
/// the new bonus overwrites the recorded best in the remote store.
///
/// Holds the per-level best-bonus cache (authoritative copy lives remotely;
/// refreshed on load and after each successful push) and the latest known
/// rank tiers.
pub struct RewardReconciler {
    backend: Arc<dyn StatsBackend>,
    player_id: PlayerId,
    best_bonuses: HashMap<LevelId, u32>,
    rank_tiers: HashMap<LevelId, RankTier>,
}

impl RewardReconciler {
    pub fn new(backend: Arc<dyn StatsBackend>, player_id: PlayerId) -> Self {
        Self {
            backend,
            player_id,
            best_bonuses: HashMap::new(),
            rank_tiers: HashMap::new(),
        }
    }

    /// Cached best bonus for a level; 0 when the level has no record yet.
    pub fn best_bonus(&self, level: LevelId) -> u32 {
        self.best_bonuses.get(&level).copied().unwrap_or(0)
    }

    /// Latest known rank tier for a level.
    pub fn rank_tier(&self, level: LevelId) -> RankTier {
        self.rank_tiers.get(&level).copied().unwrap_or_default()
    }

    /// Phase 1: bonus computation, frontier advance, push decision.
    ///
    /// A first-time clear is always recorded regardless of bonus magnitude
    /// (it is the only source of truth for "this level is now cleared"); a
    /// replay is recorded only on strict improvement. Ties do not
    /// overwrite, avoiding redundant writes and rank churn.
    pub fn settle_local(
        &self,
        attempt: &AttemptResult,
        progression: &mut ProgressionTracker,
        max_bonus_time: f64,
    ) -> Result<LocalSettlement, ProgressionError> {
        let bonus = time_bonus(attempt.elapsed_seconds, max_bonus_time);
        let first_clear = progression.advance_if_first_clear(attempt.level)?;
        let should_push = first_clear || bonus > self.best_bonus(attempt.level);

        Ok(LocalSettlement {
            level: attempt.level,
            bonus,
            first_clear,
            should_push,
        })
    }

    /// Phase 2: push the settled bonus and refresh the level's rank tier.
    ///
    /// Push failure is logged and deferred: the cache keeps the previous
    /// best and the next successful [`refresh`](Self::refresh) converges.
    /// The rank query runs regardless of push outcome; no ordering between
    /// the two calls is assumed.
    pub async fn settle_remote(&mut self, settlement: &LocalSettlement) -> ReconcileOutcome {
        if settlement.should_push {
            self.push_bonus(settlement.level, settlement.bonus).await;
        }

        let rank_tier = self.query_rank(settlement.level).await;

        ReconcileOutcome {
            bonus: settlement.bonus,
            first_clear: settlement.first_clear,
            should_push: settlement.should_push,
            rank_tier,
        }
    }

    /// Rebuilds the best-bonus cache from the remote store, then refreshes
    /// rank tiers for every known level.
    ///
    /// This is the recovery path after lost pushes: the store is
    /// authoritative, so whatever it returns overwrites stale local
    /// assumptions wholesale.
    pub async fn refresh(&mut self) -> Result<(), client_stats_core::StoreError> {
        let stats = self.backend.get_player_statistics().await?;

        self.best_bonuses.clear();
        for (name, value) in &stats {
            if let Some(level) = parse_bonus_stat(name) {
                self.best_bonuses.insert(level, (*value).max(0) as u32);
            }
        }

        tracing::debug!(
            "Refreshed {} per-level bonus records from {}",
            self.best_bonuses.len(),
            self.backend.name()
        );

        let mut levels: Vec<LevelId> = self.best_bonuses.keys().copied().collect();
        levels.sort_unstable();
        for level in levels {
            self.query_rank(level).await;
        }

        Ok(())
    }

    async fn push_bonus(&mut self, level: LevelId, bonus: u32) {
        let mut updates = HashMap::new();
        updates.insert(bonus_stat_name(level), bonus as i32);
        updates.insert(TOTAL_BONUS_STAT.to_string(), self.total_with(level, bonus));

        match self.backend.update_player_statistics(updates).await {
            Ok(()) => {
                self.best_bonuses.insert(level, bonus);
                tracing::debug!("Recorded bonus {} for {}", bonus, level);
            }
            Err(err) => {
                // Not retried; the next successful refresh() converges.
                tracing::warn!("Bonus push for {} failed, deferring: {}", level, err);
            }
        }
    }

    /// Aggregate total: recomputed sum of per-level bests, with `bonus`
    /// standing in for `level`'s record. Recomputing (rather than adding to
    /// a running total) keeps the aggregate drift-free under replays and
    /// partial failures.
    fn total_with(&self, level: LevelId, bonus: u32) -> i32 {
        let total: u64 = self
            .best_bonuses
            .iter()
            .filter(|(cached, _)| **cached != level)
            .map(|(_, best)| u64::from(*best))
            .sum::<u64>()
            + u64::from(bonus);
        total.min(i32::MAX as u64) as i32
    }

    /// Queries the player's rank on one level's leaderboard and caches the
    /// mapped tier. Any failure, or absence from the window, degrades to
    /// [`RankTier::Unranked`], never to an error that blocks progression.
    async fn query_rank(&mut self, level: LevelId) -> RankTier {
        let statistic = bonus_stat_name(level);
        let tier = match self
            .backend
            .leaderboard_around_player(&statistic, LEADERBOARD_WINDOW)
            .await
        {
            Ok(entries) => entries
                .iter()
                .find(|entry| entry.player == self.player_id)
                // Wire positions are zero-based; ranks are one-based.
                .map(|entry| RankTier::from_rank(entry.position + 1))
                .unwrap_or_default(),
            Err(err) => {
                tracing::warn!("Rank lookup for {} failed: {}", level, err);
                RankTier::Unranked
            }
        };

        self.rank_tiers.insert(level, tier);
        tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_stats_core::{LeaderboardEntry, MockStatsBackend};

    fn attempt(level: u32, elapsed: f64) -> AttemptResult {
        AttemptResult {
            level: LevelId::new(level),
            elapsed_seconds: elapsed,
            words_found: 10,
        }
    }

    fn reconciler(backend: &MockStatsBackend) -> RewardReconciler {
        RewardReconciler::new(Arc::new(backend.clone()), PlayerId::from("me"))
    }

    #[tokio::test]
    async fn first_clear_pushes_regardless_of_previous_best() {
        let backend = MockStatsBackend::new();
        backend.seed_statistic("Bonus_Level_3", 95);

        let mut reconciler = reconciler(&backend);
        reconciler.refresh().await.unwrap();
        let mut progression = ProgressionTracker::new(LevelId::new(3));

        let local = reconciler
            .settle_local(&attempt(3, 40.0), &mut progression, 100.0)
            .unwrap();
        assert_eq!(local.bonus, 60);
        assert!(local.first_clear);
        assert!(local.should_push);
        assert_eq!(progression.unlocked_level(), LevelId::new(4));

        let outcome = reconciler.settle_remote(&local).await;
        assert!(outcome.should_push);
        assert_eq!(backend.statistic("Bonus_Level_3"), Some(60));
    }

    #[tokio::test]
    async fn replay_tie_does_not_push_but_improvement_does() {
        let backend = MockStatsBackend::new();
        backend.seed_statistic("Bonus_Level_2", 70);

        let mut reconciler = reconciler(&backend);
        reconciler.refresh().await.unwrap();
        let mut progression = ProgressionTracker::new(LevelId::new(5));

        // Tie: bonus 70 equals the stored best.
        let tie = reconciler
            .settle_local(&attempt(2, 30.0), &mut progression, 100.0)
            .unwrap();
        assert!(!tie.first_clear);
        assert!(!tie.should_push);
        reconciler.settle_remote(&tie).await;
        assert!(backend.recorded_updates().is_empty());

        // One point better: strict improvement pushes.
        let better = reconciler
            .settle_local(&attempt(2, 29.0), &mut progression, 100.0)
            .unwrap();
        assert!(better.should_push);
        reconciler.settle_remote(&better).await;
        assert_eq!(backend.statistic("Bonus_Level_2"), Some(71));
    }

    #[tokio::test]
    async fn aggregate_total_is_recomputed_from_bests() {
        let backend = MockStatsBackend::new();
        backend.seed_statistic("Bonus_Level_1", 80);
        backend.seed_statistic("Bonus_Level_2", 70);

        let mut reconciler = reconciler(&backend);
        reconciler.refresh().await.unwrap();
        let mut progression = ProgressionTracker::new(LevelId::new(5));

        // Replaying level 2 with a better bonus: total = 80 + 90.
        let local = reconciler
            .settle_local(&attempt(2, 10.0), &mut progression, 100.0)
            .unwrap();
        reconciler.settle_remote(&local).await;

        assert_eq!(backend.statistic(TOTAL_BONUS_STAT), Some(170));
    }

    #[tokio::test]
    async fn failed_push_keeps_cache_until_refresh_converges() {
        let backend = MockStatsBackend::new();
        backend.seed_statistic("Bonus_Level_2", 40);

        let mut reconciler = reconciler(&backend);
        reconciler.refresh().await.unwrap();
        let mut progression = ProgressionTracker::new(LevelId::new(5));

        backend.set_offline(true);
        let local = reconciler
            .settle_local(&attempt(2, 20.0), &mut progression, 100.0)
            .unwrap();
        let outcome = reconciler.settle_remote(&local).await;

        // The decision stood, delivery did not; the cache still holds 40.
        assert!(outcome.should_push);
        assert_eq!(reconciler.best_bonus(LevelId::new(2)), 40);

        backend.set_offline(false);
        reconciler.refresh().await.unwrap();
        assert_eq!(reconciler.best_bonus(LevelId::new(2)), 40);
    }

    #[tokio::test]
    async fn rank_tiers_map_podium_and_degrade() {
        let backend = MockStatsBackend::new();
        backend.seed_statistic("Bonus_Level_1", 50);
        backend.seed_leaderboard(
            "Bonus_Level_1",
            vec![
                LeaderboardEntry {
                    player: PlayerId::from("me"),
                    position: 0,
                },
                LeaderboardEntry {
                    player: PlayerId::from("rival"),
                    position: 1,
                },
            ],
        );

        let mut reconciler = reconciler(&backend);
        reconciler.refresh().await.unwrap();
        assert_eq!(reconciler.rank_tier(LevelId::new(1)), RankTier::Gold);

        // Player absent from the window: default tier, no error.
        backend.seed_leaderboard(
            "Bonus_Level_1",
            vec![LeaderboardEntry {
                player: PlayerId::from("rival"),
                position: 0,
            }],
        );
        reconciler.refresh().await.unwrap();
        assert_eq!(reconciler.rank_tier(LevelId::new(1)), RankTier::Unranked);
    }

    #[tokio::test]
    async fn rank_lookup_failure_degrades_to_unranked() {
        let backend = MockStatsBackend::new();
        let mut reconciler = reconciler(&backend);
        let mut progression = ProgressionTracker::new(LevelId::new(1));

        backend.set_offline(true);
        let local = reconciler
            .settle_local(&attempt(1, 10.0), &mut progression, 100.0)
            .unwrap();
        let outcome = reconciler.settle_remote(&local).await;

        assert_eq!(outcome.rank_tier, RankTier::Unranked);
        assert!(outcome.first_clear);
    }

    #[tokio::test]
    async fn locked_level_is_a_contract_violation() {
        let backend = MockStatsBackend::new();
        let reconciler = reconciler(&backend);
        let mut progression = ProgressionTracker::new(LevelId::new(2));

        let err = reconciler
            .settle_local(&attempt(6, 10.0), &mut progression, 100.0)
            .unwrap_err();
        assert!(matches!(err, ProgressionError::LevelLocked { .. }));
        assert_eq!(progression.unlocked_level(), LevelId::new(2));
    }

    #[tokio::test]
    async fn negative_remote_values_clamp_to_zero() {
        let backend = MockStatsBackend::new();
        backend.seed_statistic("Bonus_Level_4", -12);

        let mut reconciler = reconciler(&backend);
        reconciler.refresh().await.unwrap();

        assert_eq!(reconciler.best_bonus(LevelId::new(4)), 0);
    }
}
