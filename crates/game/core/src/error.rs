//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., `EnergyError`, `ProgressionError`) are
//! defined in their respective modules alongside the rules they guard. This
//! module provides the shared severity classification used to pick recovery
//! strategies and logging priorities.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: temporary conditions the player can resolve (wait for
///   regen, earn more coins); surfaced to the UI, no state change.
/// - **Validation**: contract misuse by the caller; rejected without retry.
/// - **Internal**: unexpected state inconsistencies that indicate a bug.
/// - **Fatal**: the session can no longer trust its cached state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
///
/// Implemented by every domain error enum so callers can route recovery and
/// logging uniformly without matching on concrete types.
pub trait CoreError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;
}
