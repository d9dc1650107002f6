//! Statistics backend abstraction traits.
//!
//! This module defines a layered backend abstraction:
//! - Layer 1: StatisticsStore, LeaderboardQuery (independent capabilities)
//! - Layer 2: StatsBackend (composite trait)
//!
//! All calls are asynchronous and may fail or never complete in bounded
//! time; timeouts are the implementation's responsibility. Callers treat
//! "no response" and "error response" identically.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::types::LeaderboardEntry;

// ============================================================================
// Error Types
// ============================================================================

/// Backend failure, carrying a human-readable diagnostic only.
///
/// The backend exposes no structured error codes; every failure is handled
/// the same way (defer and re-converge on the next successful read), so the
/// split below exists purely for log readability.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("backend unreachable: {0}")]
    Unavailable(String),

    #[error("backend rejected request: {0}")]
    Rejected(String),
}

// ============================================================================
// Layer 1: Capability Traits
// ============================================================================

/// Durable per-player statistic storage.
///
/// Statistics are a flat name → integer mapping with last-write-wins
/// semantics; delivery is at-least-once.
#[async_trait]
pub trait StatisticsStore: Send + Sync {
    /// Fetch every statistic recorded for the current player.
    async fn get_player_statistics(&self) -> Result<HashMap<String, i32>, StoreError>;

    /// Upsert the given statistics for the current player.
    async fn update_player_statistics(
        &self,
        updates: HashMap<String, i32>,
    ) -> Result<(), StoreError>;
}

/// Leaderboard window queries centered on the current player.
#[async_trait]
pub trait LeaderboardQuery: Send + Sync {
    /// Fetch up to `max_results` entries around the current player for one
    /// statistic, ordered by position. The player's own row may be absent
    /// when they have no recorded value for the statistic.
    async fn leaderboard_around_player(
        &self,
        statistic: &str,
        max_results: u32,
    ) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

// ============================================================================
// Layer 2: Composite Trait
// ============================================================================

/// Complete remote statistics backend.
///
/// All reconciliation-compatible backends must implement this trait.
pub trait StatsBackend: StatisticsStore + LeaderboardQuery + Send + Sync {
    /// Backend name (e.g., "PlayFab", "Mock").
    fn name(&self) -> &str;

    /// Deployment environment (e.g., "production", "mock").
    fn environment(&self) -> &str;
}
