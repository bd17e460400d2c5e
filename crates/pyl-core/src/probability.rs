//! Odds of a roll and the auto-roll cadence.

use crate::dice::Die;

/// Auto-roll period at level 1, in milliseconds.
pub const AUTO_ROLL_BASE_MS: f64 = 2000.0;

/// Factor applied to the auto-roll period per level above 1.
pub const AUTO_ROLL_SPEEDUP: f64 = 0.75;

/// Shortest auto-roll period, in milliseconds.
pub const AUTO_ROLL_MIN_MS: u64 = 10;

/// Chance that no die wins: `Π (1 - w/s)`.
pub fn bust_probability(dice: &[Die]) -> f64 {
    dice.iter().map(|d| 1.0 - d.win_probability()).product()
}

/// Expected number of winning dice per roll: `Σ w/s`.
pub fn expected_successes(dice: &[Die]) -> f64 {
    dice.iter().map(Die::win_probability).sum()
}

/// Period between automatic rolls for an auto-roller `level`.
///
/// `None` when the auto-roller is not owned. Otherwise
/// `max(10, round(2000 * 0.75^(level-1)))`.
pub fn interval_ms_for_auto_roll(level: u32) -> Option<u64> {
    if level == 0 {
        return None;
    }
    let base = AUTO_ROLL_BASE_MS * AUTO_ROLL_SPEEDUP.powf(f64::from(level - 1));
    Some((base.round() as u64).max(AUTO_ROLL_MIN_MS))
}
