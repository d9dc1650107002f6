//! Session orchestration for the Wordtrail client.
//!
//! This crate wires the pure rules from `game-core` to local persistence
//! and the remote statistics backend. Consumers construct a [`GameSession`]
//! (usually through `client-bootstrap`) and drive attempts through it.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the client-facing session and attempt state machine
//! - [`reconcile`] settles finished attempts against the remote store
//! - [`repository`] persists the player profile locally
//! - [`clock`] injects the wall clock so time-dependent rules stay testable
pub mod clock;
pub mod error;
pub mod reconcile;
pub mod repository;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, RuntimeError};
pub use reconcile::{LocalSettlement, ReconcileOutcome, RewardReconciler};
pub use repository::{
    FileProfileRepository, InMemoryProfileRepo, ProfileRepository, RepositoryError,
};
pub use session::{GameSession, PurchaseKind};
