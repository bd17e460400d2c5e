//! The game state aggregate.
//!
//! One [`GameState`] holds everything a session knows: currency, the dice
//! pool, automation flags, and the recent log. It is mutated only through
//! [`GameState::apply`](crate::reducer).

use serde::{Deserialize, Serialize};

use crate::dice::{Die, DieId, RollResult};
use crate::error::{CoreError, CoreResult};
use crate::log::{GameLog, MAX_LOG_ENTRIES};

/// First log line of a fresh game.
pub const READY_MESSAGE: &str = "Ready. Press R to roll, B to bank.";

/// Auto-bank target of a fresh game.
pub const INITIAL_AUTO_BANK_TARGET: u64 = 20;

/// Lowest auto-bank target that can be configured.
pub const AUTO_BANK_TARGET_MIN: u64 = 1;

/// Highest auto-bank target that can be configured.
pub const AUTO_BANK_TARGET_MAX: u64 = 1_000_000;

/// The global price scale never drops below this.
pub const MIN_PRICE_SCALE: f64 = 0.0001;

/// Factor applied to the global price scale when a die is destroyed.
pub const DESTROY_PRICE_FACTOR: f64 = 0.5;

/// Bank growth per interest tick for each destroyed side (0.1%).
pub const INTEREST_PER_DESTROYED_SIDE: f64 = 0.001;

/// Complete state of one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Banked currency, safe from busts.
    pub bank: f64,
    /// Currency at risk on the next roll.
    pub pot: u64,
    /// Successful rolls since the last bust or bank.
    pub streak: u32,
    /// The dice pool in purchase order. Never empty.
    pub dice: Vec<Die>,
    /// Die whose upgrades are on offer.
    pub selected_die_id: Option<DieId>,
    /// Outcome of the most recent roll.
    pub last_roll: RollResult,
    /// Recent events, newest first.
    pub log: GameLog,
    /// Multiplier on the add-die price, raised by every other purchase.
    pub add_die_inflation: f64,
    /// Multiplier on every price, halved per destroyed die.
    pub global_price_scale: f64,
    /// Total sides of all destroyed dice; drives interest.
    pub destroyed_sides: u32,
    /// Auto-roller level; 0 means not owned.
    pub auto_roller_level: u32,
    /// Whether the auto-roller is running.
    pub auto_roller_active: bool,
    /// Whether the auto-banker has been bought.
    pub auto_banker_owned: bool,
    /// Whether the auto-banker is enabled.
    pub auto_banker_active: bool,
    /// Pot size at which the auto-banker banks.
    pub auto_bank_target: u64,
}

impl GameState {
    /// A fresh game: one d2 with one winning face and nothing else.
    pub fn new() -> Self {
        let starter = Die::starter(DieId(1));
        Self {
            bank: 0.0,
            pot: 0,
            streak: 0,
            dice: vec![starter],
            selected_die_id: Some(starter.id),
            last_roll: RollResult::default(),
            log: GameLog::with_entry(READY_MESSAGE),
            add_die_inflation: 1.0,
            global_price_scale: 1.0,
            destroyed_sides: 0,
            auto_roller_level: 0,
            auto_roller_active: false,
            auto_banker_owned: false,
            auto_banker_active: false,
            auto_bank_target: INITIAL_AUTO_BANK_TARGET,
        }
    }

    /// Look up a die by id.
    pub fn die(&self, id: DieId) -> Option<&Die> {
        self.dice.iter().find(|d| d.id == id)
    }

    pub(crate) fn die_mut(&mut self, id: DieId) -> Option<&mut Die> {
        self.dice.iter_mut().find(|d| d.id == id)
    }

    /// Check every invariant the transitions are meant to preserve.
    pub fn validate(&self) -> CoreResult<()> {
        if self.dice.is_empty() {
            return Err(CoreError::InvariantViolated("dice pool is empty".into()));
        }
        let mut seen = Vec::with_capacity(self.dice.len());
        for die in &self.dice {
            Die::new(die.id, die.sides, die.winning_faces)?;
            if seen.contains(&die.id) {
                return Err(CoreError::DuplicateDieId(die.id));
            }
            seen.push(die.id);
        }
        if !self.bank.is_finite() || self.bank < 0.0 {
            return Err(CoreError::InvariantViolated(format!(
                "bank is {}",
                self.bank
            )));
        }
        if self.global_price_scale.is_nan() || self.global_price_scale <= 0.0 {
            return Err(CoreError::InvariantViolated(format!(
                "price scale is {}",
                self.global_price_scale
            )));
        }
        if self.add_die_inflation < 1.0 {
            return Err(CoreError::InvariantViolated(format!(
                "add-die inflation is {}",
                self.add_die_inflation
            )));
        }
        if self.log.len() > MAX_LOG_ENTRIES {
            return Err(CoreError::InvariantViolated(format!(
                "log holds {} entries",
                self.log.len()
            )));
        }
        if !(AUTO_BANK_TARGET_MIN..=AUTO_BANK_TARGET_MAX).contains(&self.auto_bank_target) {
            return Err(CoreError::InvariantViolated(format!(
                "auto-bank target is {}",
                self.auto_bank_target
            )));
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
