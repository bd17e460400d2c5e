//! State transitions.
//!
//! Every action is total: a disallowed action (not enough money, missing
//! die, last die) leaves the state as it was apart from an advisory log
//! line. Boundaries are enforced by clamping, never by failing.

use crate::action::GameAction;
use crate::dice::{Die, DieId, RollResult, next_die_id};
use crate::economy::INFLATION_STEP;
use crate::heat::{allow_destroy, heat_multiplier, heat_raw, payout_from_dice_count};
use crate::state::{
    AUTO_BANK_TARGET_MAX, AUTO_BANK_TARGET_MIN, DESTROY_PRICE_FACTOR, GameState,
    INTEREST_PER_DESTROYED_SIDE, MIN_PRICE_SCALE,
};

/// Apply `action` to `state` and return the resulting state.
pub fn reduce(mut state: GameState, action: GameAction) -> GameState {
    state.apply(action);
    state
}

impl GameState {
    /// Apply one action in place.
    pub fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::Roll { results, from_auto } => self.roll(results, from_auto),
            GameAction::Bank => self.bank_pot(),
            GameAction::Reset => *self = GameState::new(),
            GameAction::BuyDie { cost } => self.buy_die(cost),
            GameAction::AddSide { die_id, cost } => self.add_side(die_id, cost),
            GameAction::AddWinningFace { die_id, cost } => self.add_winning_face(die_id, cost),
            GameAction::ToggleAutoRoller => self.toggle_auto_roller(),
            GameAction::BuyOrUpgradeAutoRoller { cost } => self.buy_or_upgrade_auto_roller(cost),
            GameAction::BuyAutoBanker { cost } => self.buy_auto_banker(cost),
            GameAction::ToggleAutoBanker => self.toggle_auto_banker(),
            GameAction::DestroyDie { die_id } => self.destroy_die(die_id),
            GameAction::SetAutoBankTarget { target } => {
                self.auto_bank_target = u64::try_from(target)
                    .unwrap_or(AUTO_BANK_TARGET_MIN)
                    .clamp(AUTO_BANK_TARGET_MIN, AUTO_BANK_TARGET_MAX);
            }
            GameAction::SelectDie { die_id } => self.selected_die_id = Some(die_id),
            GameAction::ApplyInterest => self.apply_interest(),
        }
    }

    fn roll(&mut self, results: RollResult, from_auto: bool) {
        let successes = results.successes();
        self.last_roll = results;

        if successes == 0 {
            if self.pot > 0 {
                self.log.push(format!("Bust. Lost pot of {}.", self.pot));
            }
            self.pot = 0;
            self.streak = 0;
            return;
        }

        let per_success = payout_from_dice_count(self.dice.len());
        let multiplier = heat_multiplier(heat_raw(&self.dice, self.streak));
        let gain = (f64::from(successes) * per_success * f64::from(multiplier)).round() as u64;
        let candidate = self.pot.saturating_add(gain);
        let suffix = if from_auto { " [auto-roll]" } else { "" };

        if self.auto_banker_owned && self.auto_banker_active && candidate >= self.auto_bank_target
        {
            self.bank += candidate as f64;
            self.pot = 0;
            self.streak = 0;
            self.log.push(format!(
                "Auto-banked {candidate} (target {}+).{suffix}",
                self.auto_bank_target
            ));
            return;
        }

        self.pot = candidate;
        self.streak = self.streak.saturating_add(1);
        self.log.push(format!(
            "Success: {successes}/{} wins. +{gain} to pot.{suffix}",
            self.dice.len()
        ));
    }

    fn bank_pot(&mut self) {
        if self.pot == 0 {
            self.log.push("Nothing to bank.");
            return;
        }
        let amount = self.pot;
        self.bank += amount as f64;
        self.pot = 0;
        self.streak = 0;
        self.log.push(format!("Banked {amount}."));
    }

    /// Deduct `cost` from the bank if it covers it.
    fn try_spend(&mut self, cost: u64) -> bool {
        let cost = cost as f64;
        if self.bank < cost {
            return false;
        }
        self.bank = (self.bank - cost).max(0.0);
        true
    }

    fn inflate_add_die_price(&mut self) {
        self.add_die_inflation *= INFLATION_STEP;
    }

    fn buy_die(&mut self, cost: u64) {
        if !self.try_spend(cost) {
            self.log.push("Insufficient funds for die.");
            return;
        }
        let die = Die::starter(next_die_id(&self.dice));
        self.dice.push(die);
        self.selected_die_id = Some(die.id);
        self.log.push(format!(
            "Bought +1 die for {cost}. New die starts as d2 with 1 winning face."
        ));
    }

    fn add_side(&mut self, die_id: DieId, cost: u64) {
        if self.die(die_id).is_none() {
            return;
        }
        if !self.try_spend(cost) {
            self.log.push("Insufficient funds for side.");
            return;
        }
        let Some(die) = self.die_mut(die_id) else {
            return;
        };
        die.sides += 1;
        die.winning_faces = die.winning_faces.min(die.sides - 1);
        let sides = die.sides;
        self.inflate_add_die_price();
        self.log.push(format!(
            "Die #{die_id}: added a side for {cost}. Now d{sides}."
        ));
    }

    fn add_winning_face(&mut self, die_id: DieId, cost: u64) {
        if self.die(die_id).is_none() {
            return;
        }
        if !self.try_spend(cost) {
            self.log.push("Insufficient funds for winning face.");
            return;
        }
        let Some(die) = self.die_mut(die_id) else {
            return;
        };
        die.winning_faces = (die.winning_faces + 1).min(die.sides - 1);
        let (faces, sides) = (die.winning_faces, die.sides);
        self.inflate_add_die_price();
        self.log.push(format!(
            "Die #{die_id}: added a winning face for {cost}. Now {faces}/{sides} win."
        ));
    }

    fn toggle_auto_roller(&mut self) {
        if self.auto_roller_level == 0 {
            self.log.push("Buy the Auto Roller first.");
            return;
        }
        self.auto_roller_active = !self.auto_roller_active;
        let verb = if self.auto_roller_active {
            "started"
        } else {
            "stopped"
        };
        self.log.push(format!("Auto Roller {verb}."));
    }

    fn buy_or_upgrade_auto_roller(&mut self, cost: u64) {
        if !self.try_spend(cost) {
            self.log.push("Insufficient funds for Auto Roller.");
            return;
        }
        let verb = if self.auto_roller_level > 0 {
            "Upgraded"
        } else {
            "Bought"
        };
        self.auto_roller_level = self.auto_roller_level.saturating_add(1).max(1);
        self.inflate_add_die_price();
        self.log.push(format!("{verb} Auto Roller for {cost}."));
    }

    fn buy_auto_banker(&mut self, cost: u64) {
        if self.auto_banker_owned {
            return;
        }
        if !self.try_spend(cost) {
            self.log.push("Insufficient funds for Auto Banker.");
            return;
        }
        self.auto_banker_owned = true;
        self.inflate_add_die_price();
        self.log.push(format!("Bought Auto Banker for {cost}."));
    }

    fn toggle_auto_banker(&mut self) {
        if !self.auto_banker_owned {
            self.log.push("Buy the Auto Banker first.");
            return;
        }
        self.auto_banker_active = !self.auto_banker_active;
        let verb = if self.auto_banker_active {
            "enabled"
        } else {
            "disabled"
        };
        self.log.push(format!(
            "Auto Banker {verb}. Target {}.",
            self.auto_bank_target
        ));
    }

    fn destroy_die(&mut self, die_id: DieId) {
        if !allow_destroy(self.dice.len()) {
            self.log.push("Cannot destroy your last die.");
            return;
        }
        let Some(index) = self.dice.iter().position(|d| d.id == die_id) else {
            return;
        };
        let die = self.dice.remove(index);
        self.global_price_scale =
            (self.global_price_scale * DESTROY_PRICE_FACTOR).max(MIN_PRICE_SCALE);
        self.destroyed_sides = self.destroyed_sides.saturating_add(die.sides);
        if self.selected_die_id == Some(die.id) {
            self.selected_die_id = self.dice.first().map(|d| d.id);
        }
        self.log.push(format!(
            "Destroyed die #{} (d{}). Prices halved; interest +{:.1}%/tick.",
            die.id,
            die.sides,
            f64::from(die.sides) * 0.1
        ));
    }

    fn apply_interest(&mut self) {
        if self.destroyed_sides == 0 || self.bank <= 0.0 {
            return;
        }
        self.bank *= 1.0 + f64::from(self.destroyed_sides) * INTEREST_PER_DESTROYED_SIDE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DieOutcome;
    use crate::log::MAX_LOG_ENTRIES;

    const EPS: f64 = 1e-9;

    fn win(id: u32) -> DieOutcome {
        DieOutcome {
            id: DieId(id),
            value: 1,
            win: true,
        }
    }

    fn miss(id: u32, value: u32) -> DieOutcome {
        DieOutcome {
            id: DieId(id),
            value,
            win: false,
        }
    }

    fn roll(outcomes: Vec<DieOutcome>) -> GameAction {
        GameAction::Roll {
            results: RollResult::new(outcomes),
            from_auto: false,
        }
    }

    fn rich(bank: f64) -> GameState {
        GameState {
            bank,
            ..GameState::new()
        }
    }

    fn two_dice() -> GameState {
        GameState {
            dice: vec![
                Die::new(DieId(1), 2, 1).unwrap(),
                Die::new(DieId(2), 4, 1).unwrap(),
            ],
            selected_die_id: Some(DieId(2)),
            ..GameState::new()
        }
    }

    // --- Roll ---

    #[test]
    fn winning_roll_fills_pot() {
        let next = reduce(GameState::new(), roll(vec![win(1)]));
        assert_eq!(next.pot, 1);
        assert_eq!(next.streak, 1);
        assert_eq!(next.last_roll.count(), 1);
        assert_eq!(next.log.latest(), Some("Success: 1/1 wins. +1 to pot."));
    }

    #[test]
    fn bust_clears_pot_and_logs() {
        let start = GameState {
            pot: 10,
            streak: 3,
            ..GameState::new()
        };
        let next = reduce(start, roll(vec![miss(1, 2)]));
        assert_eq!(next.pot, 0);
        assert_eq!(next.streak, 0);
        assert_eq!(next.log.latest(), Some("Bust. Lost pot of 10."));
    }

    #[test]
    fn bust_with_empty_pot_is_silent() {
        let start = GameState::new();
        let log_before = start.log.clone();
        let next = reduce(start, roll(vec![miss(1, 2)]));
        assert_eq!(next.pot, 0);
        assert_eq!(next.streak, 0);
        assert_eq!(next.log, log_before);
        assert_eq!(next.last_roll.count(), 1);
    }

    #[test]
    fn gain_uses_dice_count_and_heat() {
        // Three d2s at streak 20: heat 1 + 0.05*20 = 2 -> multiplier 2,
        // payout 1.2 per success, two successes -> round(4.8) = 5.
        let start = GameState {
            dice: (1..=3).map(|i| Die::starter(DieId(i))).collect(),
            streak: 20,
            pot: 7,
            ..GameState::new()
        };
        let next = reduce(start, roll(vec![win(1), win(2), miss(3, 2)]));
        assert_eq!(next.pot, 12);
        assert_eq!(next.streak, 21);
        assert_eq!(next.log.latest(), Some("Success: 2/3 wins. +5 to pot."));
    }

    #[test]
    fn fractional_heat_pays_nothing_extra() {
        let start = GameState {
            streak: 19,
            ..GameState::new()
        };
        let next = reduce(start, roll(vec![win(1)]));
        assert_eq!(next.pot, 1);
    }

    #[test]
    fn auto_banker_banks_at_target() {
        let start = GameState {
            auto_banker_owned: true,
            auto_banker_active: true,
            auto_bank_target: 1,
            streak: 4,
            ..GameState::new()
        };
        let next = reduce(
            start,
            GameAction::Roll {
                results: RollResult::new(vec![win(1)]),
                from_auto: true,
            },
        );
        assert_eq!(next.pot, 0);
        assert_eq!(next.streak, 0);
        assert!((next.bank - 1.0).abs() < EPS);
        assert_eq!(
            next.log.latest(),
            Some("Auto-banked 1 (target 1+). [auto-roll]")
        );
    }

    #[test]
    fn inactive_auto_banker_does_nothing() {
        let start = GameState {
            auto_banker_owned: true,
            auto_banker_active: false,
            auto_bank_target: 1,
            ..GameState::new()
        };
        let next = reduce(start, roll(vec![win(1)]));
        assert_eq!(next.pot, 1);
        assert_eq!(next.bank, 0.0);
    }

    #[test]
    fn auto_banker_waits_below_target() {
        let start = GameState {
            auto_banker_owned: true,
            auto_banker_active: true,
            pot: 18,
            ..GameState::new()
        };
        let next = reduce(start, roll(vec![win(1)]));
        assert_eq!(next.pot, 19);
        let next = reduce(next, roll(vec![win(1)]));
        assert_eq!(next.pot, 0);
        assert!((next.bank - 20.0).abs() < EPS);
    }

    // --- Bank ---

    #[test]
    fn bank_moves_pot() {
        let start = GameState {
            pot: 15,
            streak: 2,
            ..GameState::new()
        };
        let next = reduce(start, GameAction::Bank);
        assert!((next.bank - 15.0).abs() < EPS);
        assert_eq!(next.pot, 0);
        assert_eq!(next.streak, 0);
        assert_eq!(next.log.latest(), Some("Banked 15."));
    }

    #[test]
    fn bank_with_empty_pot_only_logs() {
        let start = GameState::new();
        let next = reduce(start.clone(), GameAction::Bank);
        assert_eq!(next.log.latest(), Some("Nothing to bank."));
        assert_eq!(next.bank, start.bank);
    }

    // --- Reset ---

    #[test]
    fn reset_returns_fresh_game() {
        let start = GameState {
            bank: 500.0,
            auto_roller_level: 3,
            auto_roller_active: true,
            ..two_dice()
        };
        assert_eq!(reduce(start, GameAction::Reset), GameState::new());
    }

    // --- Purchases ---

    #[test]
    fn buy_die_appends_and_selects() {
        let next = reduce(rich(25.0), GameAction::BuyDie { cost: 20 });
        assert!((next.bank - 5.0).abs() < EPS);
        assert_eq!(next.dice.len(), 2);
        assert_eq!(next.dice[1], Die::starter(DieId(2)));
        assert_eq!(next.selected_die_id, Some(DieId(2)));
        assert!((next.add_die_inflation - 1.0).abs() < EPS);
        assert_eq!(
            next.log.latest(),
            Some("Bought +1 die for 20. New die starts as d2 with 1 winning face.")
        );
    }

    #[test]
    fn buy_die_without_funds() {
        let start = rich(19.0);
        let next = reduce(start.clone(), GameAction::BuyDie { cost: 20 });
        assert_eq!(next.dice, start.dice);
        assert_eq!(next.bank, start.bank);
        assert_eq!(next.log.latest(), Some("Insufficient funds for die."));
    }

    #[test]
    fn add_side_upgrades_and_inflates() {
        let next = reduce(
            rich(20.0),
            GameAction::AddSide {
                die_id: DieId(1),
                cost: 14,
            },
        );
        assert!((next.bank - 6.0).abs() < EPS);
        assert_eq!(next.dice[0].sides, 3);
        assert_eq!(next.dice[0].winning_faces, 1);
        assert!((next.add_die_inflation - 1.25).abs() < EPS);
        assert_eq!(
            next.log.latest(),
            Some("Die #1: added a side for 14. Now d3.")
        );
    }

    #[test]
    fn add_side_to_missing_die_is_noop() {
        let start = rich(100.0);
        let next = reduce(
            start.clone(),
            GameAction::AddSide {
                die_id: DieId(9),
                cost: 14,
            },
        );
        assert_eq!(next, start);
    }

    #[test]
    fn add_side_without_funds() {
        let next = reduce(
            rich(1.0),
            GameAction::AddSide {
                die_id: DieId(1),
                cost: 14,
            },
        );
        assert_eq!(next.dice[0].sides, 2);
        assert_eq!(next.log.latest(), Some("Insufficient funds for side."));
    }

    #[test]
    fn winning_face_is_capped_below_sides() {
        let start = GameState {
            bank: 100.0,
            dice: vec![Die::new(DieId(1), 3, 1).unwrap()],
            ..GameState::new()
        };
        let action = GameAction::AddWinningFace {
            die_id: DieId(1),
            cost: 26,
        };
        let next = reduce(start, action.clone());
        assert_eq!(next.dice[0].winning_faces, 2);
        assert_eq!(
            next.log.latest(),
            Some("Die #1: added a winning face for 26. Now 2/3 win.")
        );

        // Already at the cap: still charged, face count unchanged.
        let next = reduce(next, action);
        assert_eq!(next.dice[0].winning_faces, 2);
        assert!((next.bank - 48.0).abs() < EPS);
        assert!((next.add_die_inflation - 1.5625).abs() < EPS);
    }

    #[test]
    fn winning_face_without_funds() {
        let next = reduce(
            GameState::new(),
            GameAction::AddWinningFace {
                die_id: DieId(1),
                cost: 20,
            },
        );
        assert_eq!(
            next.log.latest(),
            Some("Insufficient funds for winning face.")
        );
    }

    // --- Automation ---

    #[test]
    fn toggle_auto_roller_requires_purchase() {
        let next = reduce(GameState::new(), GameAction::ToggleAutoRoller);
        assert!(!next.auto_roller_active);
        assert_eq!(next.log.latest(), Some("Buy the Auto Roller first."));
    }

    #[test]
    fn auto_roller_buy_then_upgrade() {
        let next = reduce(rich(200.0), GameAction::BuyOrUpgradeAutoRoller { cost: 50 });
        assert_eq!(next.auto_roller_level, 1);
        assert_eq!(next.log.latest(), Some("Bought Auto Roller for 50."));

        let next = reduce(next, GameAction::BuyOrUpgradeAutoRoller { cost: 80 });
        assert_eq!(next.auto_roller_level, 2);
        assert!((next.bank - 70.0).abs() < EPS);
        assert!((next.add_die_inflation - 1.5625).abs() < EPS);
        assert_eq!(next.log.latest(), Some("Upgraded Auto Roller for 80."));

        let next = reduce(next, GameAction::ToggleAutoRoller);
        assert!(next.auto_roller_active);
        assert_eq!(next.log.latest(), Some("Auto Roller started."));
        let next = reduce(next, GameAction::ToggleAutoRoller);
        assert!(!next.auto_roller_active);
        assert_eq!(next.log.latest(), Some("Auto Roller stopped."));
    }

    #[test]
    fn auto_roller_without_funds() {
        let next = reduce(rich(49.0), GameAction::BuyOrUpgradeAutoRoller { cost: 50 });
        assert_eq!(next.auto_roller_level, 0);
        assert_eq!(next.log.latest(), Some("Insufficient funds for Auto Roller."));
    }

    #[test]
    fn auto_banker_purchase_is_idempotent() {
        let once = reduce(rich(200.0), GameAction::BuyAutoBanker { cost: 60 });
        assert!(once.auto_banker_owned);
        assert!((once.bank - 140.0).abs() < EPS);
        assert_eq!(once.log.latest(), Some("Bought Auto Banker for 60."));

        let twice = reduce(once.clone(), GameAction::BuyAutoBanker { cost: 60 });
        assert_eq!(twice, once);
    }

    #[test]
    fn auto_banker_without_funds() {
        let next = reduce(rich(10.0), GameAction::BuyAutoBanker { cost: 60 });
        assert!(!next.auto_banker_owned);
        assert_eq!(next.log.latest(), Some("Insufficient funds for Auto Banker."));
    }

    #[test]
    fn toggle_auto_banker() {
        let next = reduce(GameState::new(), GameAction::ToggleAutoBanker);
        assert_eq!(next.log.latest(), Some("Buy the Auto Banker first."));

        let owned = GameState {
            auto_banker_owned: true,
            ..GameState::new()
        };
        let next = reduce(owned, GameAction::ToggleAutoBanker);
        assert!(next.auto_banker_active);
        assert_eq!(next.log.latest(), Some("Auto Banker enabled. Target 20."));
        let next = reduce(next, GameAction::ToggleAutoBanker);
        assert_eq!(next.log.latest(), Some("Auto Banker disabled. Target 20."));
    }

    #[test]
    fn auto_bank_target_is_clamped() {
        let next = reduce(GameState::new(), GameAction::SetAutoBankTarget { target: 0 });
        assert_eq!(next.auto_bank_target, 1);
        let next = reduce(next, GameAction::SetAutoBankTarget { target: 5_000_000 });
        assert_eq!(next.auto_bank_target, 1_000_000);
        let next = reduce(next, GameAction::SetAutoBankTarget { target: 75 });
        assert_eq!(next.auto_bank_target, 75);
        let next = reduce(next, GameAction::SetAutoBankTarget { target: -5 });
        assert_eq!(next.auto_bank_target, 1);
        let next = reduce(next, GameAction::SetAutoBankTarget { target: i64::MAX });
        assert_eq!(next.auto_bank_target, 1_000_000);
    }

    // --- Destroy / select / interest ---

    #[test]
    fn destroy_die_halves_prices() {
        let next = reduce(two_dice(), GameAction::DestroyDie { die_id: DieId(2) });
        assert_eq!(next.dice.len(), 1);
        assert!((next.global_price_scale - 0.5).abs() < EPS);
        assert_eq!(next.destroyed_sides, 4);
        assert_eq!(next.selected_die_id, Some(DieId(1)));
        assert_eq!(
            next.log.latest(),
            Some("Destroyed die #2 (d4). Prices halved; interest +0.4%/tick.")
        );
    }

    #[test]
    fn destroy_keeps_other_selection() {
        let start = GameState {
            selected_die_id: Some(DieId(2)),
            ..two_dice()
        };
        let next = reduce(start, GameAction::DestroyDie { die_id: DieId(1) });
        assert_eq!(next.selected_die_id, Some(DieId(2)));
    }

    #[test]
    fn cannot_destroy_last_die() {
        let next = reduce(GameState::new(), GameAction::DestroyDie { die_id: DieId(1) });
        assert_eq!(next.dice.len(), 1);
        assert_eq!(next.log.latest(), Some("Cannot destroy your last die."));
    }

    #[test]
    fn destroy_missing_die_is_noop() {
        let start = two_dice();
        let next = reduce(start.clone(), GameAction::DestroyDie { die_id: DieId(7) });
        assert_eq!(next, start);
    }

    #[test]
    fn price_scale_has_a_floor() {
        let mut state = GameState {
            global_price_scale: 0.00015,
            ..two_dice()
        };
        state.apply(GameAction::DestroyDie { die_id: DieId(2) });
        assert!((state.global_price_scale - MIN_PRICE_SCALE).abs() < EPS);
    }

    #[test]
    fn select_die_is_unconditional() {
        let next = reduce(GameState::new(), GameAction::SelectDie { die_id: DieId(42) });
        assert_eq!(next.selected_die_id, Some(DieId(42)));
    }

    #[test]
    fn interest_compounds() {
        let start = GameState {
            bank: 100.0,
            destroyed_sides: 4,
            ..GameState::new()
        };
        let next = reduce(start, GameAction::ApplyInterest);
        assert!((next.bank - 100.4).abs() < EPS);
        let next = reduce(next, GameAction::ApplyInterest);
        assert!((next.bank - 100.4 * 1.004).abs() < EPS);
    }

    #[test]
    fn interest_needs_destroyed_sides_and_money() {
        let start = rich(100.0);
        assert_eq!(reduce(start.clone(), GameAction::ApplyInterest), start);

        let broke = GameState {
            destroyed_sides: 4,
            ..GameState::new()
        };
        assert_eq!(reduce(broke.clone(), GameAction::ApplyInterest), broke);
    }

    #[test]
    fn log_stays_bounded() {
        let mut state = GameState::new();
        for _ in 0..30 {
            state.apply(GameAction::Bank);
        }
        assert_eq!(state.log.len(), MAX_LOG_ENTRIES);
    }
}
