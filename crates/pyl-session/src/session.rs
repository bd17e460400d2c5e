//! Game session management.
//!
//! `GameSession` owns the game state together with everything that lives
//! beside it: the RNG that samples rolls, the automation timers, the
//! destroy confirmation gate and a millisecond clock.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use pyl_core::{DieId, GameAction, GameState, roll_dice};

use crate::automation::{Automation, Firings};
use crate::command::{Command, HELP};
use crate::config::SessionConfig;
use crate::confirm::{ConfirmGate, Confirmation};
use crate::error::{SessionError, SessionResult};

/// Outcome of a destroy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyRequest {
    /// Only one die is left; nothing was destroyed.
    Refused,
    /// The request is waiting for confirmation.
    Armed,
    /// The die was destroyed.
    Destroyed,
}

/// An interactive game session.
pub struct GameSession {
    state: GameState,
    rng: StdRng,
    automation: Automation,
    confirm: ConfirmGate,
    clock_ms: u64,
    config: SessionConfig,
}

impl GameSession {
    /// Start a fresh game.
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        debug!(seed = ?config.seed, "session started");
        let mut session = Self {
            state: GameState::new(),
            rng,
            automation: Automation::new(config.interest_interval_ms),
            confirm: ConfirmGate::new(config.confirm_window_ms),
            clock_ms: 0,
            config,
        };
        session.automation.sync(&session.state);
        session
    }

    /// Resume from an existing state, which must pass validation.
    pub fn from_state(state: GameState, config: SessionConfig) -> SessionResult<Self> {
        state.validate()?;
        let mut session = Self::new(config);
        session.state = state;
        session.automation.sync(&session.state);
        Ok(session)
    }

    /// Resume from a JSON snapshot produced by [`GameSession::snapshot_json`].
    pub fn from_snapshot_json(json: &str, config: SessionConfig) -> SessionResult<Self> {
        let state: GameState = serde_json::from_str(json)?;
        Self::from_state(state, config)
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Milliseconds advanced so far.
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// The automation timers.
    pub fn automation(&self) -> &Automation {
        &self.automation
    }

    /// The configuration this session runs with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Apply an action exactly as given and resynchronise the timers.
    pub fn dispatch(&mut self, action: GameAction) {
        trace!(action = action.kind(), "dispatch");
        if matches!(action, GameAction::Reset) {
            self.confirm.disarm();
        }
        self.state.apply(action);
        debug_assert!(self.state.validate().is_ok(), "dispatch broke the game state");
        self.automation.sync(&self.state);
    }

    /// Roll every die with the session RNG.
    pub fn roll(&mut self) {
        let results = roll_dice(&self.state.dice, &mut self.rng);
        self.dispatch(GameAction::Roll {
            results,
            from_auto: false,
        });
    }

    /// Bank the pot.
    pub fn bank(&mut self) {
        self.dispatch(GameAction::Bank);
    }

    /// Buy another die at the current price.
    pub fn buy_die(&mut self) {
        let cost = self.state.add_die_price();
        self.dispatch(GameAction::BuyDie { cost });
    }

    /// Add a side to the selected die unless it is at the side cap.
    pub fn add_side(&mut self) {
        let (Some(die), Some(cost)) = (self.state.selected_die().copied(), self.state.add_side_price())
        else {
            return;
        };
        if !die.can_add_side() {
            self.state.log.push(format!("Die #{} is at the side cap.", die.id));
            return;
        }
        self.dispatch(GameAction::AddSide {
            die_id: die.id,
            cost,
        });
    }

    /// Add a winning face to the selected die unless one face must stay losing.
    pub fn add_winning_face(&mut self) {
        let (Some(die), Some(cost)) = (
            self.state.selected_die().copied(),
            self.state.add_winning_face_price(),
        ) else {
            return;
        };
        if !die.can_add_winning_face() {
            self.state
                .log
                .push(format!("Die #{} cannot gain more winning faces.", die.id));
            return;
        }
        self.dispatch(GameAction::AddWinningFace {
            die_id: die.id,
            cost,
        });
    }

    /// Buy or upgrade the auto-roller.
    pub fn buy_auto_roller(&mut self) {
        let cost = self.state.auto_roller_price();
        self.dispatch(GameAction::BuyOrUpgradeAutoRoller { cost });
    }

    /// Buy the auto-banker if not yet owned.
    pub fn buy_auto_banker(&mut self) {
        if let Some(cost) = self.state.auto_banker_price() {
            self.dispatch(GameAction::BuyAutoBanker { cost });
        }
    }

    /// Select the die that upgrades apply to.
    pub fn select(&mut self, die_id: DieId) -> SessionResult<()> {
        if self.state.die(die_id).is_none() {
            return Err(SessionError::UnknownDie(die_id));
        }
        self.dispatch(GameAction::SelectDie { die_id });
        Ok(())
    }

    /// Ask to destroy a die. The first request arms, a repeat confirms.
    pub fn request_destroy(&mut self, die_id: DieId) -> SessionResult<DestroyRequest> {
        if self.state.die(die_id).is_none() {
            return Err(SessionError::UnknownDie(die_id));
        }
        if !self.state.can_destroy() {
            self.confirm.disarm();
            self.dispatch(GameAction::DestroyDie { die_id });
            return Ok(DestroyRequest::Refused);
        }
        match self.confirm.request(die_id, self.clock_ms) {
            Confirmation::Armed => Ok(DestroyRequest::Armed),
            Confirmation::Confirmed => {
                self.dispatch(GameAction::DestroyDie { die_id });
                Ok(DestroyRequest::Destroyed)
            }
        }
    }

    /// Let time pass, firing automation. Returns how often each timer fired.
    pub fn advance(&mut self, elapsed_ms: u64) -> Firings {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        self.automation
            .advance(elapsed_ms, &mut self.state, &mut self.rng)
    }

    /// The game state as pretty-printed JSON.
    pub fn snapshot_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        if input.trim().is_empty() {
            return Ok(String::new());
        }
        let command: Command = input.parse()?;
        let written = self.state.log.written();

        match command {
            Command::Roll => {
                self.roll();
                Ok(format!(
                    "Rolled {}. Pot {}, bank {}.",
                    self.state.last_roll,
                    self.state.pot,
                    self.state.bank_display()
                ))
            }
            Command::Bank => {
                self.bank();
                Ok(self.logged_since(written))
            }
            Command::Reset => {
                self.dispatch(GameAction::Reset);
                Ok(self.state.log.latest().unwrap_or_default().to_string())
            }
            Command::BuyDie => {
                self.buy_die();
                Ok(self.logged_since(written))
            }
            Command::AddSide => {
                self.add_side();
                Ok(self.logged_since(written))
            }
            Command::AddWinningFace => {
                self.add_winning_face();
                Ok(self.logged_since(written))
            }
            Command::BuyAutoRoller => {
                self.buy_auto_roller();
                Ok(self.logged_since(written))
            }
            Command::ToggleAutoRoller => {
                self.dispatch(GameAction::ToggleAutoRoller);
                Ok(self.logged_since(written))
            }
            Command::BuyAutoBanker => {
                if self.state.auto_banker_owned {
                    return Ok("Auto Banker already owned.".to_string());
                }
                self.buy_auto_banker();
                Ok(self.logged_since(written))
            }
            Command::ToggleAutoBanker => {
                self.dispatch(GameAction::ToggleAutoBanker);
                Ok(self.logged_since(written))
            }
            Command::Target(target) => {
                self.dispatch(GameAction::SetAutoBankTarget { target });
                Ok(format!(
                    "Auto-bank target set to {}.",
                    self.state.auto_bank_target
                ))
            }
            Command::Select(die_id) => {
                self.select(die_id)?;
                Ok(format!("Selected die #{die_id}."))
            }
            Command::Destroy(die_id) => match self.request_destroy(die_id)? {
                DestroyRequest::Armed => Ok(format!(
                    "Destroy die #{die_id}? Repeat within {} ms to confirm.",
                    self.config.confirm_window_ms
                )),
                DestroyRequest::Refused | DestroyRequest::Destroyed => {
                    Ok(self.logged_since(written))
                }
            },
            Command::Wait(ms) => {
                let fired = self.advance(ms);
                Ok(format!(
                    "Advanced {ms} ms: {} auto-rolls, {} interest ticks.",
                    fired.auto_rolls, fired.interest_ticks
                ))
            }
            Command::Status => Ok(self.status()),
            Command::Help => Ok(HELP.to_string()),
        }
    }

    /// The newest log line if anything was logged after `written`.
    fn logged_since(&self, written: u64) -> String {
        match self.state.log.latest() {
            Some(line) if self.state.log.written() != written => line.to_string(),
            _ => "Nothing happened.".to_string(),
        }
    }

    /// A multi-line summary of the game.
    pub fn status(&self) -> String {
        let s = &self.state;
        let stats = s.stats();
        let prices = s.prices();
        let mut lines = vec![format!(
            "Bank {} | Pot {} | Streak {} | Heat {} (x{})",
            s.bank_display(),
            s.pot,
            s.streak,
            s.format_heat(),
            stats.heat_multiplier
        )];

        let selected = s.selected_die().map(|d| d.id);
        let dice: Vec<String> = s
            .dice
            .iter()
            .map(|d| {
                let text = format!("#{} d{} {}/{}", d.id, d.sides, d.winning_faces, d.sides);
                if Some(d.id) == selected {
                    format!("[{text}]")
                } else {
                    text
                }
            })
            .collect();
        lines.push(format!("Dice: {}", dice.join(", ")));

        lines.push(format!(
            "Bust {:.1}% | Expected wins {:.2} | Per win {:.2}",
            stats.bust_probability * 100.0,
            stats.expected_successes,
            stats.payout_per_success
        ));

        let side = match prices.add_side {
            Some(_) if !s.can_add_side() => "max".to_string(),
            Some(p) => p.to_string(),
            None => "-".to_string(),
        };
        let face = match prices.add_winning_face {
            Some(_) if !s.can_add_winning_face() => "max".to_string(),
            Some(p) => p.to_string(),
            None => "-".to_string(),
        };
        let banker = prices
            .auto_banker
            .map_or_else(|| "owned".to_string(), |p| p.to_string());
        lines.push(format!(
            "Prices: die {}, side {side}, face {face}, roller {}, banker {banker}",
            prices.add_die, prices.auto_roller
        ));

        match stats.auto_roll_interval_ms {
            Some(ms) => lines.push(format!(
                "Auto Roller: level {}, every {ms} ms, {}",
                s.auto_roller_level,
                if s.auto_roller_active {
                    "running"
                } else {
                    "stopped"
                }
            )),
            None => lines.push("Auto Roller: not owned".to_string()),
        }

        if s.auto_banker_owned {
            lines.push(format!(
                "Auto Banker: {}, target {}",
                if s.auto_banker_active { "on" } else { "off" },
                s.auto_bank_target
            ));
        } else {
            lines.push("Auto Banker: not owned".to_string());
        }

        if s.destroyed_sides > 0 {
            lines.push(format!(
                "Interest: +{:.1}%/tick",
                stats.interest_rate_per_tick
            ));
        }

        lines.join("\n")
    }
}
