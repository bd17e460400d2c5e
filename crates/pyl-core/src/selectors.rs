//! Derived, read-only views of a [`GameState`].
//!
//! Nothing here is stored: prices and odds are recomputed from the state on
//! every call so they can never drift from it.

use serde::{Deserialize, Serialize};

use crate::dice::{Die, DieId, DieOutcome};
use crate::economy::{
    cost_add_die, cost_add_side_for, cost_add_winning_face_for, cost_auto_banker,
    cost_auto_roller, MIN_PRICE, scaled_price,
};
use crate::heat::{
    allow_destroy, compute_starting_heat, heat_multiplier, heat_raw, payout_from_dice_count,
};
use crate::probability::{bust_probability, expected_successes, interval_ms_for_auto_roll};
use crate::state::GameState;

/// Current price of every purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prices {
    /// Price of another die.
    pub add_die: u64,
    /// Price of a side on the selected die.
    pub add_side: Option<u64>,
    /// Price of a winning face on the selected die.
    pub add_winning_face: Option<u64>,
    /// Price of buying or upgrading the auto-roller.
    pub auto_roller: u64,
    /// Price of the auto-banker; `None` once owned.
    pub auto_banker: Option<u64>,
}

/// Odds and multipliers for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Heat from the dice alone.
    pub starting_heat: f64,
    /// Heat including the streak bonus.
    pub heat_raw: f64,
    /// Whole-number payout multiplier.
    pub heat_multiplier: u32,
    /// Payout per winning die before heat.
    pub payout_per_success: f64,
    /// Chance the next roll busts.
    pub bust_probability: f64,
    /// Expected winning dice per roll.
    pub expected_successes: f64,
    /// Auto-roll period, if the auto-roller is owned.
    pub auto_roll_interval_ms: Option<u64>,
    /// Interest earned per tick, in percent.
    pub interest_rate_per_tick: f64,
}

impl GameState {
    /// The selected die, falling back to the first die when the selection is stale.
    pub fn selected_die(&self) -> Option<&Die> {
        self.selected_die_id
            .and_then(|id| self.die(id))
            .or_else(|| self.dice.first())
    }

    /// Heat from the dice pool alone.
    pub fn starting_heat(&self) -> f64 {
        compute_starting_heat(&self.dice)
    }

    /// Heat including the streak bonus.
    pub fn heat_raw(&self) -> f64 {
        heat_raw(&self.dice, self.streak)
    }

    /// Whole-number payout multiplier.
    pub fn heat_multiplier(&self) -> u32 {
        heat_multiplier(self.heat_raw())
    }

    /// Payout per winning die before heat.
    pub fn payout_per_success(&self) -> f64 {
        payout_from_dice_count(self.dice.len())
    }

    /// Chance the next roll busts.
    pub fn bust_probability(&self) -> f64 {
        bust_probability(&self.dice)
    }

    /// Expected winning dice per roll.
    pub fn expected_successes(&self) -> f64 {
        expected_successes(&self.dice)
    }

    /// Whether a die may be destroyed right now.
    pub fn can_destroy(&self) -> bool {
        allow_destroy(self.dice.len())
    }

    /// Whether the selected die can take another side.
    pub fn can_add_side(&self) -> bool {
        self.selected_die().is_some_and(Die::can_add_side)
    }

    /// Whether the selected die can take another winning face.
    pub fn can_add_winning_face(&self) -> bool {
        self.selected_die().is_some_and(Die::can_add_winning_face)
    }

    fn scaled(&self, base: u64) -> u64 {
        scaled_price(base, self.global_price_scale)
    }

    /// Price of another die, including add-die inflation.
    pub fn add_die_price(&self) -> u64 {
        let inflated = cost_add_die(self.dice.len()) as f64 * self.add_die_inflation;
        ((inflated * self.global_price_scale).round() as u64).max(MIN_PRICE)
    }

    /// Price of a side on the selected die.
    pub fn add_side_price(&self) -> Option<u64> {
        self.selected_die()
            .map(|d| self.scaled(cost_add_side_for(d.sides)))
    }

    /// Price of a winning face on the selected die.
    pub fn add_winning_face_price(&self) -> Option<u64> {
        self.selected_die()
            .map(|d| self.scaled(cost_add_winning_face_for(d.winning_faces)))
    }

    /// Price of buying or upgrading the auto-roller.
    pub fn auto_roller_price(&self) -> u64 {
        self.scaled(cost_auto_roller(self.auto_roller_level))
    }

    /// Price of the auto-banker, or `None` once owned.
    pub fn auto_banker_price(&self) -> Option<u64> {
        (!self.auto_banker_owned).then(|| self.scaled(cost_auto_banker()))
    }

    /// Period between automatic rolls.
    pub fn auto_roll_interval_ms(&self) -> Option<u64> {
        interval_ms_for_auto_roll(self.auto_roller_level)
    }

    /// Interest per tick, in percent of the bank.
    pub fn interest_rate_per_tick(&self) -> f64 {
        f64::from(self.destroyed_sides) * 0.1
    }

    /// Bank rounded down for display.
    pub fn bank_display(&self) -> u64 {
        self.bank.floor() as u64
    }

    /// Raw heat formatted as a multiplier, e.g. `x1.05`.
    pub fn format_heat(&self) -> String {
        format!("x{:.2}", self.heat_raw())
    }

    /// What a die showed on the last roll.
    pub fn last_roll_for(&self, id: DieId) -> Option<&DieOutcome> {
        self.last_roll.outcome_for(id)
    }

    /// All current prices.
    pub fn prices(&self) -> Prices {
        Prices {
            add_die: self.add_die_price(),
            add_side: self.add_side_price(),
            add_winning_face: self.add_winning_face_price(),
            auto_roller: self.auto_roller_price(),
            auto_banker: self.auto_banker_price(),
        }
    }

    /// All current odds and multipliers.
    pub fn stats(&self) -> Stats {
        Stats {
            starting_heat: self.starting_heat(),
            heat_raw: self.heat_raw(),
            heat_multiplier: self.heat_multiplier(),
            payout_per_success: self.payout_per_success(),
            bust_probability: self.bust_probability(),
            expected_successes: self.expected_successes(),
            auto_roll_interval_ms: self.auto_roll_interval_ms(),
            interest_rate_per_tick: self.interest_rate_per_tick(),
        }
    }
}
