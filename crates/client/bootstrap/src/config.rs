//! Client session configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use game_core::GameConfig;

/// Configuration required to bootstrap a client session.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    pub game: GameConfig,
    pub data_dir: Option<PathBuf>,
}

impl SessionConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WORDTRAIL_DATA_DIR` - Directory for the profile document (default: platform-specific)
    /// - `WORDTRAIL_ENERGY_CAP` - Starting energy capacity (default: 5)
    /// - `WORDTRAIL_REGEN_HOURS` - Hours per regenerated energy unit (default: 1)
    /// - `WORDTRAIL_MAX_BONUS_TIME` - Maximum time bonus per attempt (default: 100)
    /// - `WORDTRAIL_TARGET_WORDS` - Words required to complete a level (default: 10)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<u32>("WORDTRAIL_ENERGY_CAP") {
            config.game.energy_capacity = capacity.max(1);
        }
        if let Some(hours) = read_env::<f32>("WORDTRAIL_REGEN_HOURS") {
            if hours > 0.0 {
                config.game.regen_period_hours = hours;
            }
        }
        if let Some(max_bonus) = read_env::<f64>("WORDTRAIL_MAX_BONUS_TIME") {
            if max_bonus >= 0.0 {
                config.game.max_bonus_time = max_bonus;
            }
        }
        if let Some(target) = read_env::<u32>("WORDTRAIL_TARGET_WORDS") {
            config.game.target_word_count = target.max(1);
        }

        config.data_dir = env::var("WORDTRAIL_DATA_DIR").ok().map(PathBuf::from);

        config
    }

    /// Directory the profile document lives in: the configured override, the
    /// platform data dir, or a local fallback when neither resolves.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "wordtrail")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("wordtrail-data"))
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.parse().ok())
}
