//! Time-bonus scoring for finished level attempts.

/// Decaying time bonus for a single attempt.
///
/// The bonus starts at `max_bonus_time` and loses one point per elapsed
/// second, floored at zero: `round(max(0, max_bonus_time - elapsed))`.
/// Monotonically non-increasing in `elapsed_seconds`, deterministic, and
/// defined for all non-negative inputs.
pub fn time_bonus(elapsed_seconds: f64, max_bonus_time: f64) -> u32 {
    let remaining = (max_bonus_time - elapsed_seconds).max(0.0);
    remaining.round() as u32
}
