//! Persisted player profile document.

use crate::coins::CoinWallet;
use crate::config::GameConfig;
use crate::energy::{EnergyLedger, EnergyState};
use crate::progression::{LevelId, ProgressionTracker};
use crate::time::Timestamp;

/// Everything the client persists locally between sessions.
///
/// Written after every mutating operation; read once on startup. Per-level
/// best bonuses are deliberately absent: the remote store is authoritative
/// for those and the cache is rebuilt from it on every load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub energy: u32,
    pub energy_capacity: u32,
    pub last_energy_at: Timestamp,
    pub unlocked_level: LevelId,
    pub coins: u32,
}

impl PlayerProfile {
    /// First-run defaults: full energy, first level unlocked, empty wallet.
    pub fn new_player(config: &GameConfig, now: Timestamp) -> Self {
        Self {
            energy: config.energy_capacity,
            energy_capacity: config.energy_capacity,
            last_energy_at: now,
            unlocked_level: LevelId::FIRST,
            coins: 0,
        }
    }

    /// Captures the current session state for persistence.
    pub fn snapshot(
        ledger: &EnergyLedger,
        progression: &ProgressionTracker,
        wallet: &CoinWallet,
    ) -> Self {
        let energy = ledger.state();
        Self {
            energy: energy.current,
            energy_capacity: energy.capacity,
            last_energy_at: energy.last_regen,
            unlocked_level: progression.unlocked_level(),
            coins: wallet.coins(),
        }
    }

    pub fn energy_state(&self) -> EnergyState {
        EnergyState {
            current: self.energy,
            capacity: self.energy_capacity,
            last_regen: self.last_energy_at,
        }
    }
}
