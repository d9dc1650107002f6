//! Deterministic gameplay rules shared across clients.
//!
//! `game-core` defines the canonical progression rules (energy regeneration,
//! level unlocking, time-bonus scoring, rank tiers) and exposes pure APIs
//! reused by the runtime and offline tools. The crate performs no I/O and
//! never reads clocks; instants are captured by callers and passed in.
pub mod attempt;
pub mod bonus;
pub mod coins;
pub mod config;
pub mod energy;
pub mod error;
pub mod profile;
pub mod progression;
pub mod rank;
pub mod time;

pub use attempt::{ActiveAttempt, AttemptResult, WordProgress};
pub use bonus::time_bonus;
pub use coins::{CoinError, CoinWallet};
pub use config::GameConfig;
pub use energy::{EnergyError, EnergyLedger, EnergyState};
pub use error::{CoreError, ErrorSeverity};
pub use profile::PlayerProfile;
pub use progression::{LevelId, ProgressionError, ProgressionTracker};
pub use rank::RankTier;
pub use time::Timestamp;
