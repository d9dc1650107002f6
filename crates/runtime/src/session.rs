//! Client-facing game session: the surface gameplay and UI code drive.
//!
//! One session owns the energy ledger, the unlock frontier, the coin
//! wallet, and the reward reconciler, wired together by explicit
//! dependency injection. Attempts run strictly serially: a second
//! `start_attempt` is rejected until the running attempt finishes or is
//! abandoned, so no lock is needed around ledger or progression mutation.

use std::sync::Arc;

use client_stats_core::{PlayerId, StatsBackend};
use game_core::{
    ActiveAttempt, CoinWallet, EnergyLedger, GameConfig, LevelId, PlayerProfile, ProgressionError,
    ProgressionTracker, RankTier, Timestamp, WordProgress,
};

use crate::clock::Clock;
use crate::error::{Result, RuntimeError};
use crate::reconcile::{ReconcileOutcome, RewardReconciler};
use crate::repository::ProfileRepository;

/// Store purchases the session knows how to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseKind {
    /// One energy unit, capped at capacity.
    EnergyRefill,
    /// One extra energy slot; refills on purchase.
    EnergySlot,
}

pub struct GameSession {
    config: GameConfig,
    clock: Arc<dyn Clock>,
    repository: Arc<dyn ProfileRepository>,
    ledger: EnergyLedger,
    progression: ProgressionTracker,
    wallet: CoinWallet,
    reconciler: RewardReconciler,
    attempt: Option<ActiveAttempt>,
}

impl GameSession {
    /// Loads the persisted profile (creating first-run defaults when absent)
    /// and assembles the session. Remote state is not touched here; call
    /// [`reload`](Self::reload) afterwards to refresh the bonus cache.
    pub fn new(
        config: GameConfig,
        clock: Arc<dyn Clock>,
        repository: Arc<dyn ProfileRepository>,
        backend: Arc<dyn StatsBackend>,
        player_id: PlayerId,
    ) -> Result<Self> {
        let profile = match repository.load()? {
            Some(profile) => profile,
            None => {
                let profile = PlayerProfile::new_player(&config, clock.now());
                repository.save(&profile)?;
                tracing::info!("Created first-run player profile");
                profile
            }
        };

        let ledger = EnergyLedger::from_state(profile.energy_state(), config.seconds_per_unit());
        let progression = ProgressionTracker::new(profile.unlocked_level);
        let wallet = CoinWallet::new(profile.coins);

        Ok(Self {
            config,
            clock,
            repository,
            ledger,
            progression,
            wallet,
            reconciler: RewardReconciler::new(backend, player_id),
            attempt: None,
        })
    }

    /// Startup path: accrues offline energy regen, then refreshes the
    /// best-bonus cache and rank tiers from the remote store. Remote
    /// failure leaves the cached records in place.
    pub async fn reload(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.tick_energy(now)?;

        if let Err(err) = self.reconciler.refresh().await {
            tracing::warn!("Statistics reload failed, keeping cached records: {}", err);
        }

        Ok(())
    }

    // ===== attempts =====

    /// Starts an attempt on `level`.
    ///
    /// The frontier level is free to attempt; replaying an earlier level
    /// costs one energy. Rejected while another attempt is running or when
    /// `level` is beyond the unlock frontier.
    pub fn start_attempt(&mut self, level: LevelId) -> Result<()> {
        if self.attempt.is_some() {
            return Err(RuntimeError::AttemptInProgress);
        }
        if !self.progression.is_unlocked(level) {
            return Err(ProgressionError::LevelLocked {
                requested: level,
                frontier: self.progression.unlocked_level(),
            }
            .into());
        }

        let now = self.clock.now();
        self.ledger.tick(now);

        if level < self.progression.unlocked_level() {
            self.ledger.spend(now)?;
        }

        self.attempt = Some(ActiveAttempt::new(level, now, self.config.target_word_count));
        self.persist()?;
        tracing::info!("Started attempt on {}", level);
        Ok(())
    }

    /// Counts one found word toward the running attempt's completion
    /// target. Dictionary membership is validated by the caller.
    pub fn record_word_found(&mut self) -> Result<WordProgress> {
        let attempt = self.attempt.as_mut().ok_or(RuntimeError::NoActiveAttempt)?;
        Ok(attempt.record_word())
    }

    /// Finishes the running attempt and reconciles it.
    ///
    /// Progression advances and the profile is persisted before the first
    /// network call, so the unlock frontier survives any remote failure.
    /// The attempt is consumed either way; it is never reconciled twice.
    pub async fn finish_attempt(&mut self) -> Result<ReconcileOutcome> {
        let attempt = self.attempt.take().ok_or(RuntimeError::NoActiveAttempt)?;
        let now = self.clock.now();
        let result = attempt.finish(now);

        let local = match self.reconciler.settle_local(
            &result,
            &mut self.progression,
            self.config.max_bonus_time,
        ) {
            Ok(local) => local,
            Err(err) => {
                // Fatal to the attempt, never to the process.
                tracing::error!("Attempt on {} violated the unlock contract: {}", result.level, err);
                return Err(err.into());
            }
        };
        self.persist()?;

        let outcome = self.reconciler.settle_remote(&local).await;
        tracing::info!(
            "Settled {}: bonus {}, first clear {}, tier {}",
            result.level,
            outcome.bonus,
            outcome.first_clear,
            outcome.rank_tier.as_str()
        );
        Ok(outcome)
    }

    /// Discards the running attempt without reconciliation. Energy already
    /// spent stays spent. Returns whether an attempt was discarded.
    pub fn abandon_attempt(&mut self) -> bool {
        match self.attempt.take() {
            Some(attempt) => {
                tracing::debug!("Abandoned attempt on {}", attempt.level());
                true
            }
            None => false,
        }
    }

    pub fn active_attempt(&self) -> Option<&ActiveAttempt> {
        self.attempt.as_ref()
    }

    // ===== reads =====

    /// Current energy after accruing any regen due at this instant.
    pub fn current_energy(&mut self) -> Result<u32> {
        let now = self.clock.now();
        self.tick_energy(now)?;
        Ok(self.ledger.current())
    }

    pub fn energy_capacity(&self) -> u32 {
        self.ledger.capacity()
    }

    /// Seconds until the next energy unit; 0 when full.
    pub fn time_until_next_unit(&mut self) -> Result<u64> {
        let now = self.clock.now();
        self.tick_energy(now)?;
        Ok(self.ledger.time_until_next_unit(now))
    }

    pub fn current_unlocked_level(&self) -> LevelId {
        self.progression.unlocked_level()
    }

    pub fn is_unlocked(&self, level: LevelId) -> bool {
        self.progression.is_unlocked(level)
    }

    pub fn coins(&self) -> u32 {
        self.wallet.coins()
    }

    pub fn best_bonus_for(&self, level: LevelId) -> u32 {
        self.reconciler.best_bonus(level)
    }

    /// Latest known rank tier for a level (cached; refreshed on reload and
    /// after each reconciliation touching the level).
    pub fn rank_tier_for(&self, level: LevelId) -> RankTier {
        self.reconciler.rank_tier(level)
    }

    // ===== wallet and purchases =====

    pub fn add_coins(&mut self, amount: u32) -> Result<()> {
        self.wallet.add(amount);
        self.persist()
    }

    pub fn spend_coins(&mut self, amount: u32) -> Result<()> {
        self.wallet.spend(amount)?;
        self.persist()
    }

    /// Applies a completed store purchase. Returns whether it had any
    /// effect (an energy refill at full capacity has none).
    pub fn apply_purchase(&mut self, kind: PurchaseKind) -> Result<bool> {
        let applied = match kind {
            PurchaseKind::EnergyRefill => self.ledger.grant_one(),
            PurchaseKind::EnergySlot => {
                self.ledger.increase_capacity();
                true
            }
        };

        if applied {
            self.persist()?;
            tracing::info!(
                "Applied purchase {:?}: energy {}/{}",
                kind,
                self.ledger.current(),
                self.ledger.capacity()
            );
        }
        Ok(applied)
    }

    // ===== internals =====

    fn tick_energy(&mut self, now: Timestamp) -> Result<()> {
        if self.ledger.tick(now) > 0 {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let profile = PlayerProfile::snapshot(&self.ledger, &self.progression, &self.wallet);
        self.repository.save(&profile)?;
        Ok(())
    }
}
