//! Actions the reducer understands.

use serde::{Deserialize, Serialize};

use crate::dice::{DieId, RollResult};

/// A single state transition request.
///
/// Prices are supplied by the caller (normally computed from the
/// [selectors](crate::selectors)) so that the charge matches what was shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameAction {
    /// Resolve a roll whose outcomes were sampled elsewhere.
    Roll {
        /// Per-die outcomes in pool order.
        results: RollResult,
        /// Whether the auto-roller triggered this roll.
        #[serde(default)]
        from_auto: bool,
    },
    /// Move the pot into the bank.
    Bank,
    /// Start over with a fresh game.
    Reset,
    /// Buy another d2.
    BuyDie {
        /// Price to charge.
        cost: u64,
    },
    /// Add one side to a die.
    AddSide {
        /// Die to upgrade.
        die_id: DieId,
        /// Price to charge.
        cost: u64,
    },
    /// Add one winning face to a die.
    #[serde(rename = "ADD_WIN_FACE")]
    AddWinningFace {
        /// Die to upgrade.
        die_id: DieId,
        /// Price to charge.
        cost: u64,
    },
    /// Start or stop the auto-roller.
    ToggleAutoRoller,
    /// Buy the auto-roller, or raise its level when already owned.
    BuyOrUpgradeAutoRoller {
        /// Price to charge.
        cost: u64,
    },
    /// Buy the auto-banker. Does nothing once owned.
    BuyAutoBanker {
        /// Price to charge.
        cost: u64,
    },
    /// Enable or disable the auto-banker.
    ToggleAutoBanker,
    /// Permanently remove a die in exchange for cheaper prices and interest.
    DestroyDie {
        /// Die to remove.
        die_id: DieId,
    },
    /// Configure the pot size the auto-banker waits for.
    SetAutoBankTarget {
        /// Requested target, clamped into range on apply.
        target: i64,
    },
    /// Change which die the upgrades apply to.
    SelectDie {
        /// Die to select.
        die_id: DieId,
    },
    /// Grow the bank by the interest earned from destroyed dice.
    ApplyInterest,
}

impl GameAction {
    /// Short name of the action, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Roll { .. } => "roll",
            Self::Bank => "bank",
            Self::Reset => "reset",
            Self::BuyDie { .. } => "buy_die",
            Self::AddSide { .. } => "add_side",
            Self::AddWinningFace { .. } => "add_winning_face",
            Self::ToggleAutoRoller => "toggle_auto_roller",
            Self::BuyOrUpgradeAutoRoller { .. } => "buy_or_upgrade_auto_roller",
            Self::BuyAutoBanker { .. } => "buy_auto_banker",
            Self::ToggleAutoBanker => "toggle_auto_banker",
            Self::DestroyDie { .. } => "destroy_die",
            Self::SetAutoBankTarget { .. } => "set_auto_bank_target",
            Self::SelectDie { .. } => "select_die",
            Self::ApplyInterest => "apply_interest",
        }
    }
}
