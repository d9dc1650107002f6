//! Repository contract for saving and loading the player profile.

use game_core::PlayerProfile;

use crate::repository::Result;

/// Repository for player profile persistence.
///
/// The profile is a single document written after every mutating operation
/// and read once on startup. Implementations must make `save` atomic: a
/// crash mid-write may lose the latest save but never corrupt the stored
/// document.
pub trait ProfileRepository: Send + Sync {
    /// Load the stored profile; `None` on first run.
    fn load(&self) -> Result<Option<PlayerProfile>>;

    /// Persist the profile, replacing any previous document.
    fn save(&self, profile: &PlayerProfile) -> Result<()>;
}
