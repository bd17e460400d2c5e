//! Error types for the game core.
//!
//! State transitions never fail; these errors only surface from checked
//! constructors and the invariant checker.

use crate::dice::DieId;

/// Errors raised by checked construction and validation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A die was described with an impossible side or winning-face count.
    #[error("invalid die: {sides} sides with {winning_faces} winning faces")]
    InvalidDie {
        /// Requested number of sides.
        sides: u32,
        /// Requested number of winning faces.
        winning_faces: u32,
    },

    /// Two dice in the same collection share an id.
    #[error("duplicate die id: {0}")]
    DuplicateDieId(DieId),

    /// A game state broke one of its invariants.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
