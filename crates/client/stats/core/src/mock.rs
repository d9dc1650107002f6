//! Mock statistics backend for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::traits::{LeaderboardQuery, StatisticsStore, StatsBackend, StoreError};
use crate::types::LeaderboardEntry;

/// Mock statistics backend for testing without network.
///
/// Simulates the remote store in-memory. Failures are scripted via
/// [`MockStatsBackend::set_offline`]; while offline every call returns
/// [`StoreError::Unavailable`] and mutates nothing.
#[derive(Clone, Default)]
pub struct MockStatsBackend {
    stats: Arc<Mutex<HashMap<String, i32>>>,
    leaderboards: Arc<Mutex<HashMap<String, Vec<LeaderboardEntry>>>>,
    update_log: Arc<Mutex<Vec<HashMap<String, i32>>>>,
    offline: Arc<Mutex<bool>>,
}

impl MockStatsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts network failure for every subsequent call.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    /// Seeds a statistic as if a previous session had recorded it.
    pub fn seed_statistic(&self, name: impl Into<String>, value: i32) {
        self.stats.lock().unwrap().insert(name.into(), value);
    }

    /// Seeds the leaderboard window returned for one statistic.
    pub fn seed_leaderboard(&self, statistic: impl Into<String>, entries: Vec<LeaderboardEntry>) {
        self.leaderboards
            .lock()
            .unwrap()
            .insert(statistic.into(), entries);
    }

    /// Every update payload accepted so far, oldest first.
    pub fn recorded_updates(&self) -> Vec<HashMap<String, i32>> {
        self.update_log.lock().unwrap().clone()
    }

    /// Current value of one statistic, if any.
    pub fn statistic(&self, name: &str) -> Option<i32> {
        self.stats.lock().unwrap().get(name).copied()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if *self.offline.lock().unwrap() {
            Err(StoreError::Unavailable("mock backend offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StatisticsStore for MockStatsBackend {
    async fn get_player_statistics(&self) -> Result<HashMap<String, i32>, StoreError> {
        self.check_online()?;
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn update_player_statistics(
        &self,
        updates: HashMap<String, i32>,
    ) -> Result<(), StoreError> {
        self.check_online()?;
        self.stats.lock().unwrap().extend(updates.clone());
        self.update_log.lock().unwrap().push(updates);
        Ok(())
    }
}

#[async_trait]
impl LeaderboardQuery for MockStatsBackend {
    async fn leaderboard_around_player(
        &self,
        statistic: &str,
        max_results: u32,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.check_online()?;
        let mut entries = self
            .leaderboards
            .lock()
            .unwrap()
            .get(statistic)
            .cloned()
            .unwrap_or_default();
        entries.truncate(max_results as usize);
        Ok(entries)
    }
}

impl StatsBackend for MockStatsBackend {
    fn name(&self) -> &str {
        "Mock"
    }

    fn environment(&self) -> &str {
        "mock"
    }
}
