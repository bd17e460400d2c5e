//! Purchase prices.
//!
//! Base prices depend only on progression counters. Every charged price is
//! then scaled by the global price scale (and, for new dice, the add-die
//! inflation) and floored at 1 so nothing is ever free.

/// Price of the first extra die.
pub const ADD_DIE_BASE: u64 = 20;

/// Fixed base price of the auto-banker.
pub const AUTO_BANKER_BASE: u64 = 60;

/// Growth applied to the winning-face price per face already owned.
pub const WINNING_FACE_GROWTH: f64 = 1.3;

/// Growth applied to the auto-roller price per level already owned.
pub const AUTO_ROLLER_GROWTH: f64 = 1.6;

/// Factor applied to the add-die inflation after every non-die purchase.
pub const INFLATION_STEP: f64 = 1.25;

/// Cheapest any scaled price can get.
pub const MIN_PRICE: u64 = 1;

/// Base price of another die when `dice_count` dice are owned.
///
/// Doubles with every die: 20, 40, 80, ...
pub fn cost_add_die(dice_count: usize) -> u64 {
    let exponent = dice_count.saturating_sub(1) as f64;
    (ADD_DIE_BASE as f64 * 2f64.powf(exponent)) as u64
}

/// Base price of one more side on a die that currently has `sides`.
pub fn cost_add_side_for(sides: u32) -> u64 {
    (10.0 + 2.0 * f64::from(sides)).round() as u64
}

/// Base price of one more winning face on a die that currently has `winning_faces`.
pub fn cost_add_winning_face_for(winning_faces: u32) -> u64 {
    (20.0 * WINNING_FACE_GROWTH.powf(f64::from(winning_faces))).round() as u64
}

/// Base price of buying (level 0) or upgrading the auto-roller.
pub fn cost_auto_roller(level: u32) -> u64 {
    (50.0 * AUTO_ROLLER_GROWTH.powf(f64::from(level))).round() as u64
}

/// Base price of the auto-banker.
pub fn cost_auto_banker() -> u64 {
    AUTO_BANKER_BASE
}

/// Apply a price multiplier, rounding and flooring at [`MIN_PRICE`].
pub fn scaled_price(base: u64, scale: f64) -> u64 {
    ((base as f64 * scale).round() as u64).max(MIN_PRICE)
}
