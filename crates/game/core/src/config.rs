/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of energy slots a fresh profile starts with.
    pub energy_capacity: u32,
    /// Hours a single energy unit takes to regenerate.
    pub regen_period_hours: f32,
    /// Maximum time bonus; an attempt finishing instantly earns this much.
    pub max_bonus_time: f64,
    /// Valid words required to complete a level attempt.
    pub target_word_count: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENERGY_CAPACITY: u32 = 5;
    pub const DEFAULT_REGEN_PERIOD_HOURS: f32 = 1.0;
    pub const DEFAULT_MAX_BONUS_TIME: f64 = 100.0;
    pub const DEFAULT_TARGET_WORD_COUNT: u32 = 10;

    pub fn new() -> Self {
        Self {
            energy_capacity: Self::DEFAULT_ENERGY_CAPACITY,
            regen_period_hours: Self::DEFAULT_REGEN_PERIOD_HOURS,
            max_bonus_time: Self::DEFAULT_MAX_BONUS_TIME,
            target_word_count: Self::DEFAULT_TARGET_WORD_COUNT,
        }
    }

    /// Whole seconds per regenerated energy unit.
    ///
    /// Regeneration is whole-unit granular, so fractional hours collapse to
    /// whole seconds and the ledger math stays in integers.
    pub fn seconds_per_unit(&self) -> u64 {
        (self.regen_period_hours * 3600.0).round().max(1.0) as u64
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
