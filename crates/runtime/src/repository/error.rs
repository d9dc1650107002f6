//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
///
/// Any of these invalidates the session's trust in its cached profile; the
/// next load re-derives what it can from remote authoritative data.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("profile repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
