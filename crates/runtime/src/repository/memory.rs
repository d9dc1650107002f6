//! In-memory ProfileRepository for tests.

use std::sync::Mutex;

use game_core::PlayerProfile;

use crate::repository::{ProfileRepository, RepositoryError, Result};

/// In-memory implementation of ProfileRepository.
#[derive(Default)]
pub struct InMemoryProfileRepo {
    slot: Mutex<Option<PlayerProfile>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the stored profile, as if saved by a previous session.
    pub fn with_profile(profile: PlayerProfile) -> Self {
        Self {
            slot: Mutex::new(Some(profile)),
        }
    }
}

impl ProfileRepository for InMemoryProfileRepo {
    fn load(&self) -> Result<Option<PlayerProfile>> {
        let slot = self.slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(*slot)
    }

    fn save(&self, profile: &PlayerProfile) -> Result<()> {
        let mut slot = self.slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(*profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameConfig, Timestamp};

    #[test]
    fn stores_and_returns_the_latest_save() {
        let repo = InMemoryProfileRepo::new();
        assert!(repo.load().unwrap().is_none());

        let mut profile = PlayerProfile::new_player(&GameConfig::default(), Timestamp::new(7));
        repo.save(&profile).unwrap();
        profile.coins = 3;
        repo.save(&profile).unwrap();

        assert_eq!(repo.load().unwrap().unwrap().coins, 3);
    }
}
