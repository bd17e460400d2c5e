//! Sampling a roll of the whole pool.

use rand::Rng;

use super::roll::{DieOutcome, RollResult};
use super::Die;

/// Roll every die once with the given RNG.
///
/// Each die draws uniformly from `1..=sides` and wins iff the value is at or
/// below its winning-face count. Knows nothing about pot or bank.
pub fn roll_dice<R: Rng + ?Sized>(dice: &[Die], rng: &mut R) -> RollResult {
    let dice = dice
        .iter()
        .map(|die| {
            let value = rng.random_range(1..=die.sides);
            DieOutcome::of(die, value)
        })
        .collect();
    RollResult { dice }
}
