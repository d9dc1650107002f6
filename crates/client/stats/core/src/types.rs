//! Common types and wire conventions for the statistics backend.

use serde::{Deserialize, Serialize};

use game_core::LevelId;

/// Statistic name holding the aggregate of all per-level best bonuses.
pub const TOTAL_BONUS_STAT: &str = "Bonus";

const BONUS_LEVEL_PREFIX: &str = "Bonus_Level_";

/// Statistic name recording the best bonus for one level.
pub fn bonus_stat_name(level: LevelId) -> String {
    format!("{BONUS_LEVEL_PREFIX}{}", level.0)
}

/// Inverse of [`bonus_stat_name`]; `None` for any other statistic
/// (including the aggregate [`TOTAL_BONUS_STAT`]).
pub fn parse_bonus_stat(name: &str) -> Option<LevelId> {
    name.strip_prefix(BONUS_LEVEL_PREFIX)?
        .parse::<u32>()
        .ok()
        .map(LevelId)
}

/// Backend-assigned player identity.
///
/// Opaque to the client; only compared for equality when locating the
/// player's own row in a leaderboard window.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One row of a leaderboard window.
///
/// `position` is zero-based, following the backend's convention; ranks
/// shown to players are `position + 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: PlayerId,
    pub position: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_stat_names_round_trip() {
        let name = bonus_stat_name(LevelId::new(7));
        assert_eq!(name, "Bonus_Level_7");
        assert_eq!(parse_bonus_stat(&name), Some(LevelId::new(7)));
    }

    #[test]
    fn unrelated_stats_do_not_parse() {
        assert_eq!(parse_bonus_stat(TOTAL_BONUS_STAT), None);
        assert_eq!(parse_bonus_stat("Bonus_Level_"), None);
        assert_eq!(parse_bonus_stat("Bonus_Level_abc"), None);
        assert_eq!(parse_bonus_stat("Streak"), None);
    }
}
