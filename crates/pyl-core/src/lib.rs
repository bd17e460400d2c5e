//! Economy and state-transition core for a push-your-luck dice game.
//!
//! The player rolls a pool of dice, grows a pot on every roll where at least
//! one die wins, and either banks it or risks it again. Banked currency buys
//! more dice, more sides, more winning faces, and automation.
//!
//! Everything here is pure and deterministic: the [`GameState`] is changed
//! only by [`GameState::apply`] (or [`reduce`]), randomness is injected into
//! [`roll_dice`], and prices and odds are derived on demand by the
//! [selectors](selectors).

pub mod action;
pub mod dice;
pub mod economy;
pub mod error;
pub mod heat;
pub mod log;
pub mod probability;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use action::GameAction;
pub use dice::{Die, DieId, DieOutcome, RollResult, roll_dice};
pub use error::{CoreError, CoreResult};
pub use log::GameLog;
pub use reducer::reduce;
pub use selectors::{Prices, Stats};
pub use state::GameState;
