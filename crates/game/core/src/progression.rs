//! Level unlock frontier and first-clear advancement.

use std::fmt;

use crate::error::{CoreError, ErrorSeverity};

/// One-based level identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelId(pub u32);

impl LevelId {
    /// The first playable level; fresh profiles start here.
    pub const FIRST: Self = Self(1);

    pub fn new(index: u32) -> Self {
        Self(index.max(1))
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for LevelId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}

/// Tracks the highest unlocked level.
///
/// `unlocked` is monotonically non-decreasing over the tracker's lifetime:
/// the only mutation is the exactly-once advance on a first clear of the
/// frontier level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressionTracker {
    unlocked: LevelId,
}

impl ProgressionTracker {
    pub fn new(unlocked: LevelId) -> Self {
        Self { unlocked }
    }

    /// The frontier: the highest level the player may attempt.
    pub fn unlocked_level(&self) -> LevelId {
        self.unlocked
    }

    pub fn is_unlocked(&self, level: LevelId) -> bool {
        level <= self.unlocked
    }

    /// Advances the frontier if `level` is a first-time clear.
    ///
    /// Returns `Ok(true)` when `level` was the frontier (now advanced by
    /// one), `Ok(false)` when `level` was a replay of an earlier level.
    /// Clearing a level beyond the frontier is a caller contract violation:
    /// the attempt should never have started.
    pub fn advance_if_first_clear(&mut self, level: LevelId) -> Result<bool, ProgressionError> {
        if level > self.unlocked {
            return Err(ProgressionError::LevelLocked {
                requested: level,
                frontier: self.unlocked,
            });
        }
        if level == self.unlocked {
            self.unlocked = self.unlocked.next();
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        Self::new(LevelId::FIRST)
    }
}

/// Errors raised by progression mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("{requested} is locked (frontier is {frontier})")]
    LevelLocked { requested: LevelId, frontier: LevelId },
}

impl CoreError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ProgressionError::LevelLocked { .. } => ErrorSeverity::Validation,
        }
    }
}
