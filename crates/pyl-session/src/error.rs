//! Error types for the session layer.

use pyl_core::{CoreError, DieId};
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from the session surface. Game rules never produce these.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input did not match any known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A die id does not belong to the current pool.
    #[error("no die #{0}")]
    UnknownDie(DieId),

    /// A supplied state failed validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Rendering a snapshot failed.
    #[error("snapshot failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
