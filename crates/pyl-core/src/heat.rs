//! Heat and per-success payout.
//!
//! Heat starts from how oversized the dice are and climbs with the streak.
//! Only whole heat levels pay: the multiplier is the floor of raw heat,
//! never below 1.

use crate::dice::Die;

/// Starting heat added per side above two, summed over all dice.
pub const HEAT_PER_EXTRA_SIDE: f64 = 0.1;

/// Heat added per consecutive successful roll.
pub const HEAT_PER_STREAK: f64 = 0.05;

/// Per-success payout added for each die beyond the first.
pub const PAYOUT_PER_EXTRA_DIE: f64 = 0.1;

/// Baseline heat of a dice pool: `1 + 0.1 * Σ max(0, sides - 2)`.
pub fn compute_starting_heat(dice: &[Die]) -> f64 {
    let units: u32 = dice.iter().map(|d| d.sides.saturating_sub(2)).sum();
    1.0 + HEAT_PER_EXTRA_SIDE * f64::from(units)
}

/// Raw heat for a pool after `streak` consecutive successes.
pub fn heat_raw(dice: &[Die], streak: u32) -> f64 {
    compute_starting_heat(dice) + HEAT_PER_STREAK * f64::from(streak)
}

/// Stepped payout multiplier derived from raw heat.
pub fn heat_multiplier(raw: f64) -> u32 {
    raw.floor().max(1.0) as u32
}

/// Payout per winning die when `dice_count` dice are owned.
pub fn payout_from_dice_count(dice_count: usize) -> f64 {
    1.0 + PAYOUT_PER_EXTRA_DIE * dice_count.saturating_sub(1) as f64
}

/// Destroying a die is allowed only while more than one remains.
pub fn allow_destroy(dice_count: usize) -> bool {
    dice_count > 1
}
