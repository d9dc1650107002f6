//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules crate and the repositories so clients can
//! bubble them up with consistent context. Remote-store failures never
//! appear here: they are absorbed at the reconciliation boundary and
//! recovered by deferral.

use thiserror::Error;

use game_core::{CoinError, CoreError, EnergyError, ErrorSeverity, ProgressionError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("an attempt is already running")]
    AttemptInProgress,

    #[error("no attempt is running")]
    NoActiveAttempt,

    #[error(transparent)]
    Energy(#[from] EnergyError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Coins(#[from] CoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// Severity classification for recovery and logging decisions.
    ///
    /// Repository failures are fatal: the session can no longer trust that
    /// its cached profile matches disk.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::AttemptInProgress | RuntimeError::NoActiveAttempt => {
                ErrorSeverity::Validation
            }
            RuntimeError::Energy(e) => e.severity(),
            RuntimeError::Progression(e) => e.severity(),
            RuntimeError::Coins(e) => e.severity(),
            RuntimeError::Repository(_) => ErrorSeverity::Fatal,
        }
    }
}
