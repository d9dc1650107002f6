//! File-based ProfileRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::PlayerProfile;

use crate::repository::{ProfileRepository, RepositoryError, Result};

const PROFILE_FILE: &str = "profile.json";

/// File-based implementation of ProfileRepository.
///
/// Stores the profile as a single JSON document. Saves go through a temp
/// file plus atomic rename so a crash mid-write leaves the previous
/// document intact.
pub struct FileProfileRepository {
    path: PathBuf,
}

impl FileProfileRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(PROFILE_FILE),
        })
    }
}

impl ProfileRepository for FileProfileRepository {
    fn load(&self) -> Result<Option<PlayerProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        let profile: PlayerProfile = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded profile from {}", self.path.display());

        Ok(Some(profile))
    }

    fn save(&self, profile: &PlayerProfile) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(profile)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        // Write to temp file, then atomic rename
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved profile to {}", self.path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameConfig, Timestamp};

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileProfileRepository::new(dir.path()).unwrap();

        assert!(repo.load().unwrap().is_none());

        let mut profile = PlayerProfile::new_player(&GameConfig::default(), Timestamp::new(42));
        profile.coins = 17;
        repo.save(&profile).unwrap();

        assert_eq!(repo.load().unwrap(), Some(profile));
    }

    #[test]
    fn save_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileProfileRepository::new(dir.path()).unwrap();

        let mut profile = PlayerProfile::new_player(&GameConfig::default(), Timestamp::new(42));
        repo.save(&profile).unwrap();

        profile.energy = 1;
        repo.save(&profile).unwrap();

        assert_eq!(repo.load().unwrap().unwrap().energy, 1);
    }

    #[test]
    fn corrupted_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileProfileRepository::new(dir.path()).unwrap();

        fs::write(dir.path().join(PROFILE_FILE), b"not json").unwrap();

        assert!(matches!(
            repo.load(),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
