//! Capped, time-regenerating energy ledger.
//!
//! Energy gates level attempts. Units regenerate on a fixed period even
//! while the client is not running; the ledger is handed the current
//! instant and computes how many whole units accrued since the persisted
//! baseline.

use crate::error::{CoreError, ErrorSeverity};
use crate::time::Timestamp;

/// Persisted snapshot of the ledger.
///
/// # Invariants
///
/// - `current <= capacity`
/// - `last_regen` is meaningful only while `current < capacity`; while the
///   ledger is full no regen debt accrues and the field goes stale until
///   the next [`EnergyLedger::spend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyState {
    pub current: u32,
    pub capacity: u32,
    pub last_regen: Timestamp,
}

/// Mutable ledger over an [`EnergyState`] plus the configured regen period.
///
/// The regen period is configuration, not state; it is supplied at
/// construction and never persisted.
#[derive(Clone, Debug)]
pub struct EnergyLedger {
    current: u32,
    capacity: u32,
    last_regen: Timestamp,
    seconds_per_unit: u64,
}

impl EnergyLedger {
    /// Fresh ledger for a first-run profile: full, baseline at `now`.
    pub fn new(capacity: u32, seconds_per_unit: u64, now: Timestamp) -> Self {
        Self {
            current: capacity,
            capacity: capacity.max(1),
            last_regen: now,
            seconds_per_unit: seconds_per_unit.max(1),
        }
    }

    /// Rehydrates a ledger from persisted state.
    ///
    /// A corrupted snapshot with `current > capacity` is clamped rather than
    /// rejected; the overflow invariant holds on every path out of here.
    pub fn from_state(state: EnergyState, seconds_per_unit: u64) -> Self {
        let capacity = state.capacity.max(1);
        Self {
            current: state.current.min(capacity),
            capacity,
            last_regen: state.last_regen,
            seconds_per_unit: seconds_per_unit.max(1),
        }
    }

    /// Snapshot for persistence.
    pub fn state(&self) -> EnergyState {
        EnergyState {
            current: self.current,
            capacity: self.capacity,
            last_regen: self.last_regen,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.capacity
    }

    /// Spends one unit.
    ///
    /// Leaving the full state starts the regen timer: the present instant
    /// becomes the baseline the next accrual is measured from.
    pub fn spend(&mut self, now: Timestamp) -> Result<(), EnergyError> {
        if self.current == 0 {
            return Err(EnergyError::Insufficient);
        }
        let was_full = self.is_full();
        self.current -= 1;
        if was_full {
            self.last_regen = now;
        }
        Ok(())
    }

    /// Accrues whole regenerated units up to `now`. Returns units added.
    ///
    /// The baseline advances by exactly the time the added units consumed,
    /// carrying leftover sub-unit time forward. Resetting it to `now`
    /// instead would discard partial progress on every call and slow
    /// regeneration under frequent polling.
    pub fn tick(&mut self, now: Timestamp) -> u32 {
        if self.is_full() {
            return 0;
        }

        let elapsed = now.seconds_since(self.last_regen);
        let units = elapsed / self.seconds_per_unit;
        if units == 0 {
            return 0;
        }

        let missing = u64::from(self.capacity - self.current);
        if units >= missing {
            // Reached capacity; the baseline is stale-but-irrelevant until
            // the next spend() recaptures it.
            self.current = self.capacity;
            missing as u32
        } else {
            self.current += units as u32;
            self.last_regen = self.last_regen + units * self.seconds_per_unit;
            units as u32
        }
    }

    /// Adds one unit outside the regen schedule (e.g., a refill purchase).
    ///
    /// Returns whether anything was added; a grant while full is a no-op.
    /// The baseline is untouched: partial regen progress keeps counting.
    pub fn grant_one(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Adds one capacity slot and refills to the new capacity.
    pub fn increase_capacity(&mut self) {
        self.capacity += 1;
        self.current = self.capacity;
    }

    /// Seconds until the next unit would accrue; 0 when full or overdue.
    pub fn time_until_next_unit(&self, now: Timestamp) -> u64 {
        if self.is_full() {
            return 0;
        }
        let elapsed = now.seconds_since(self.last_regen);
        self.seconds_per_unit.saturating_sub(elapsed)
    }
}

/// Errors raised by ledger mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnergyError {
    #[error("no energy available to spend")]
    Insufficient,
}

impl CoreError for EnergyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EnergyError::Insufficient => ErrorSeverity::Recoverable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: u64 = 3600;

    fn partial_ledger(current: u32, capacity: u32, baseline: Timestamp) -> EnergyLedger {
        EnergyLedger::from_state(
            EnergyState {
                current,
                capacity,
                last_regen: baseline,
            },
            HOUR,
        )
    }

    #[test]
    fn spend_from_full_captures_baseline() {
        let t0 = Timestamp::new(10_000);
        let mut ledger = EnergyLedger::new(5, HOUR, Timestamp::EPOCH);

        ledger.spend(t0).unwrap();

        assert_eq!(ledger.current(), 4);
        assert_eq!(ledger.state().last_regen, t0);
    }

    #[test]
    fn spend_below_full_keeps_baseline() {
        let t0 = Timestamp::new(10_000);
        let mut ledger = partial_ledger(3, 5, t0);

        ledger.spend(Timestamp::new(12_000)).unwrap();

        assert_eq!(ledger.current(), 2);
        assert_eq!(ledger.state().last_regen, t0);
    }

    #[test]
    fn spend_at_zero_fails_without_state_change() {
        let t0 = Timestamp::new(10_000);
        let mut ledger = partial_ledger(0, 5, t0);

        assert_eq!(ledger.spend(Timestamp::new(99_999)), Err(EnergyError::Insufficient));
        assert_eq!(ledger.current(), 0);
        assert_eq!(ledger.state().last_regen, t0);
    }

    #[test]
    fn tick_carries_leftover_time_forward() {
        let t0 = Timestamp::new(50_000);
        let mut ledger = partial_ledger(1, 5, t0);

        // 1.5 units elapsed: one unit accrues, half a unit carries.
        let added = ledger.tick(t0 + 5400);

        assert_eq!(added, 1);
        assert_eq!(ledger.current(), 2);
        assert_eq!(ledger.state().last_regen, t0 + HOUR);

        // The carried half-unit completes after 30 more minutes.
        assert_eq!(ledger.tick(t0 + 5400 + 1799), 0);
        assert_eq!(ledger.tick(t0 + 7200), 1);
        assert_eq!(ledger.current(), 3);
    }

    #[test]
    fn tick_below_one_unit_changes_nothing() {
        let t0 = Timestamp::new(50_000);
        let mut ledger = partial_ledger(4, 5, t0);

        assert_eq!(ledger.tick(t0 + 1800), 0);
        assert_eq!(ledger.current(), 4);
        assert_eq!(ledger.state().last_regen, t0);
    }

    #[test]
    fn tick_to_capacity_stops_at_capacity() {
        let t0 = Timestamp::new(50_000);
        let mut ledger = partial_ledger(4, 5, t0);

        assert_eq!(ledger.tick(t0 + 5400), 1);
        assert_eq!(ledger.current(), 5);

        // Repeated ticks far in the future never overflow capacity.
        assert_eq!(ledger.tick(t0 + 500 * HOUR), 0);
        assert_eq!(ledger.current(), 5);
    }

    #[test]
    fn tick_is_idempotent_for_the_same_instant() {
        let t0 = Timestamp::new(50_000);
        let now = t0 + 2 * HOUR + 123;

        let mut once = partial_ledger(1, 5, t0);
        once.tick(now);

        let mut twice = partial_ledger(1, 5, t0);
        twice.tick(now);
        twice.tick(now);

        assert_eq!(once.state(), twice.state());
    }

    #[test]
    fn offline_accrual_grants_multiple_units() {
        let t0 = Timestamp::new(50_000);
        let mut ledger = partial_ledger(0, 5, t0);

        let added = ledger.tick(t0 + 2 * HOUR + 42);

        assert_eq!(added, 2);
        assert_eq!(ledger.current(), 2);
        // 42 leftover seconds stay banked.
        assert_eq!(ledger.state().last_regen, t0 + 2 * HOUR);
    }

    #[test]
    fn grant_one_respects_capacity_and_baseline() {
        let t0 = Timestamp::new(50_000);
        let mut ledger = partial_ledger(3, 5, t0);

        assert!(ledger.grant_one());
        assert_eq!(ledger.current(), 4);
        assert_eq!(ledger.state().last_regen, t0);

        assert!(ledger.grant_one());
        assert!(!ledger.grant_one());
        assert_eq!(ledger.current(), 5);
    }

    #[test]
    fn increase_capacity_refills() {
        let t0 = Timestamp::new(50_000);
        let mut ledger = partial_ledger(1, 5, t0);

        ledger.increase_capacity();

        assert_eq!(ledger.capacity(), 6);
        assert_eq!(ledger.current(), 6);
    }

    #[test]
    fn time_until_next_unit_counts_down() {
        let t0 = Timestamp::new(50_000);
        let ledger = partial_ledger(2, 5, t0);

        assert_eq!(ledger.time_until_next_unit(t0), HOUR);
        assert_eq!(ledger.time_until_next_unit(t0 + 1000), HOUR - 1000);
        assert_eq!(ledger.time_until_next_unit(t0 + 2 * HOUR), 0);

        let full = EnergyLedger::new(5, HOUR, t0);
        assert_eq!(full.time_until_next_unit(t0 + 10), 0);
    }

    #[test]
    fn corrupted_snapshot_is_clamped_on_load() {
        let state = EnergyState {
            current: 9,
            capacity: 5,
            last_regen: Timestamp::EPOCH,
        };
        let ledger = EnergyLedger::from_state(state, HOUR);
        assert_eq!(ledger.current(), 5);
    }
}
