//! Dice owned by the player.
//!
//! Every die is a fair n-sided die where the faces `1..=winning_faces` count
//! as a win. Dice are upgraded in place and identified by a stable id.

pub mod resolver;
pub mod roll;

pub use resolver::roll_dice;
pub use roll::{DieOutcome, RollResult};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Sides a freshly bought die starts with.
pub const STARTING_SIDES: u32 = 2;

/// Winning faces a freshly bought die starts with.
pub const STARTING_WINNING_FACES: u32 = 1;

/// Largest side count the side upgrade may reach.
pub const MAX_SIDES: u32 = 20;

/// Stable identifier of a die within one game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DieId(pub u32);

impl std::fmt::Display for DieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single die in the player's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Die {
    /// Stable id, unique within the pool.
    pub id: DieId,
    /// Number of faces (at least 2).
    pub sides: u32,
    /// Faces `1..=winning_faces` win. Always within `1..sides`.
    pub winning_faces: u32,
}

impl Die {
    /// A fresh d2 with one winning face.
    pub fn starter(id: DieId) -> Self {
        Self {
            id,
            sides: STARTING_SIDES,
            winning_faces: STARTING_WINNING_FACES,
        }
    }

    /// Build a die, rejecting side/face combinations that break the invariants.
    pub fn new(id: DieId, sides: u32, winning_faces: u32) -> CoreResult<Self> {
        if sides < 2 || winning_faces == 0 || winning_faces >= sides {
            return Err(CoreError::InvalidDie {
                sides,
                winning_faces,
            });
        }
        Ok(Self {
            id,
            sides,
            winning_faces,
        })
    }

    /// Chance that this die shows a winning face.
    pub fn win_probability(&self) -> f64 {
        f64::from(self.winning_faces) / f64::from(self.sides)
    }

    /// Whether the side upgrade is still offered for this die.
    pub fn can_add_side(&self) -> bool {
        self.sides < MAX_SIDES
    }

    /// Whether another winning face fits below the `sides - 1` cap.
    pub fn can_add_winning_face(&self) -> bool {
        self.winning_faces < self.sides.saturating_sub(1)
    }

    /// Whether a rolled value counts as a win on this die.
    pub fn is_win(&self, value: u32) -> bool {
        value <= self.winning_faces
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.winning_faces == 1 { "" } else { "s" };
        write!(
            f,
            "Die #{}: d{} ({} winning face{plural})",
            self.id, self.sides, self.winning_faces
        )
    }
}

/// Id for the next die added to `dice`: one past the largest id, or 1 when empty.
pub fn next_die_id(dice: &[Die]) -> DieId {
    DieId(dice.iter().map(|d| d.id.0).max().unwrap_or(0) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_is_coin_flip() {
        let d = Die::starter(DieId(1));
        assert_eq!(d.sides, 2);
        assert_eq!(d.winning_faces, 1);
        assert!((d.win_probability() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn checked_constructor() {
        assert!(Die::new(DieId(1), 6, 5).is_ok());
        assert!(Die::new(DieId(1), 1, 0).is_err());
        assert!(Die::new(DieId(1), 6, 0).is_err());
        assert!(Die::new(DieId(1), 6, 6).is_err());
    }

    #[test]
    fn upgrade_caps() {
        let d = Die::new(DieId(1), 20, 19).unwrap();
        assert!(!d.can_add_side());
        assert!(!d.can_add_winning_face());

        let d = Die::new(DieId(1), 4, 2).unwrap();
        assert!(d.can_add_side());
        assert!(d.can_add_winning_face());
    }

    #[test]
    fn win_faces_are_low_values() {
        let d = Die::new(DieId(1), 6, 2).unwrap();
        assert!(d.is_win(1));
        assert!(d.is_win(2));
        assert!(!d.is_win(3));
    }

    #[test]
    fn next_id_skips_past_max() {
        assert_eq!(next_die_id(&[]), DieId(1));
        let dice = [Die::starter(DieId(4)), Die::starter(DieId(2))];
        assert_eq!(next_die_id(&dice), DieId(5));
    }

    #[test]
    fn display() {
        assert_eq!(
            Die::starter(DieId(3)).to_string(),
            "Die #3: d2 (1 winning face)"
        );
        assert_eq!(
            Die::new(DieId(1), 6, 2).unwrap().to_string(),
            "Die #1: d6 (2 winning faces)"
        );
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&Die::starter(DieId(1))).unwrap();
        assert_eq!(json, r#"{"id":1,"sides":2,"winningFaces":1}"#);
    }
}
