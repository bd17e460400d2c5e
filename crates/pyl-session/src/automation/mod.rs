//! Timers for the auto-roller and interest.
//!
//! [`Automation`] owns at most one timer of each kind and keeps them in
//! step with a [`GameState`]: call [`Automation::sync`] after every state
//! change, and [`Automation::advance`] to let time pass. Because timers are
//! re-synchronised after each firing too, a timer that the state switches
//! off never fires again.

mod timer;

pub use timer::PeriodicTimer;

use pyl_core::{GameAction, GameState, roll_dice};
use rand::Rng;
use tracing::{debug, trace};

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// An automatic roll.
    AutoRoll,
    /// An interest payment.
    Interest,
}

/// How often each timer fired during one [`Automation::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Firings {
    /// Automatic rolls applied.
    pub auto_rolls: u64,
    /// Interest payments applied.
    pub interest_ticks: u64,
}

impl Firings {
    /// Total firings of either kind.
    pub fn total(&self) -> u64 {
        self.auto_rolls + self.interest_ticks
    }

    /// Whether nothing fired.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The automation timers of one session.
#[derive(Debug, Clone)]
pub struct Automation {
    auto_roll: Option<PeriodicTimer>,
    interest: Option<PeriodicTimer>,
    interest_interval_ms: u64,
    interest_key: u32,
}

impl Automation {
    /// No timers running; interest fires every `interest_interval_ms` once enabled.
    pub fn new(interest_interval_ms: u64) -> Self {
        Self {
            auto_roll: None,
            interest: None,
            interest_interval_ms: interest_interval_ms.max(1),
            interest_key: 0,
        }
    }

    /// Whether a timer of `kind` is running.
    pub fn is_running(&self, kind: TimerKind) -> bool {
        self.timer(kind).is_some()
    }

    /// Time until the next firing of `kind`, if it is running.
    pub fn remaining_ms(&self, kind: TimerKind) -> Option<u64> {
        self.timer(kind).map(PeriodicTimer::remaining_ms)
    }

    fn timer(&self, kind: TimerKind) -> Option<&PeriodicTimer> {
        match kind {
            TimerKind::AutoRoll => self.auto_roll.as_ref(),
            TimerKind::Interest => self.interest.as_ref(),
        }
    }

    fn timer_mut(&mut self, kind: TimerKind) -> Option<&mut PeriodicTimer> {
        match kind {
            TimerKind::AutoRoll => self.auto_roll.as_mut(),
            TimerKind::Interest => self.interest.as_mut(),
        }
    }

    /// Start, stop or restart timers to match `state`.
    pub fn sync(&mut self, state: &GameState) {
        let roll_period = if state.auto_roller_active {
            state.auto_roll_interval_ms()
        } else {
            None
        };
        match (roll_period, &self.auto_roll) {
            (Some(period), Some(t)) if t.period_ms() == period => {}
            (Some(period), _) => {
                debug!(period_ms = period, "auto-roll timer started");
                self.auto_roll = Some(PeriodicTimer::new(period));
            }
            (None, Some(_)) => {
                debug!("auto-roll timer stopped");
                self.auto_roll = None;
            }
            (None, None) => {}
        }

        if state.destroyed_sides == 0 {
            if self.interest.take().is_some() {
                debug!("interest timer stopped");
            }
            self.interest_key = 0;
        } else if self.interest.is_none() || self.interest_key != state.destroyed_sides {
            debug!(
                period_ms = self.interest_interval_ms,
                destroyed_sides = state.destroyed_sides,
                "interest timer started"
            );
            self.interest = Some(PeriodicTimer::new(self.interest_interval_ms));
            self.interest_key = state.destroyed_sides;
        }
    }

    /// The running timer that fires first; auto-roll wins ties.
    fn next_due(&self) -> Option<(TimerKind, u64)> {
        let roll = self
            .auto_roll
            .as_ref()
            .map(|t| (TimerKind::AutoRoll, t.remaining_ms()));
        let interest = self
            .interest
            .as_ref()
            .map(|t| (TimerKind::Interest, t.remaining_ms()));
        match (roll, interest) {
            (Some(r), Some(i)) => Some(if i.1 < r.1 { i } else { r }),
            (r, i) => r.or(i),
        }
    }

    fn advance_all(&mut self, ms: u64) {
        if let Some(t) = self.auto_roll.as_mut() {
            t.advance(ms);
        }
        if let Some(t) = self.interest.as_mut() {
            t.advance(ms);
        }
    }

    /// Let `elapsed_ms` pass, firing due timers in deadline order.
    ///
    /// Auto-roll firings sample the dice with `rng` and apply a roll marked
    /// as automatic; interest firings apply [`GameAction::ApplyInterest`].
    /// Catch-up work grows with `elapsed_ms` divided by the shortest period,
    /// so callers bound how much time one call covers.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: u64,
        state: &mut GameState,
        rng: &mut R,
    ) -> Firings {
        self.sync(state);
        let mut fired = Firings::default();
        let mut left = elapsed_ms;

        while let Some((kind, remaining)) = self.next_due() {
            if remaining > left {
                break;
            }
            self.advance_all(remaining);
            left -= remaining;

            if let Some(t) = self.timer_mut(kind) {
                t.rearm();
            }
            match kind {
                TimerKind::AutoRoll => {
                    let results = roll_dice(&state.dice, rng);
                    trace!(%results, "auto-roll fired");
                    state.apply(GameAction::Roll {
                        results,
                        from_auto: true,
                    });
                    fired.auto_rolls += 1;
                }
                TimerKind::Interest => {
                    trace!(destroyed_sides = state.destroyed_sides, "interest fired");
                    state.apply(GameAction::ApplyInterest);
                    fired.interest_ticks += 1;
                }
            }
            debug_assert!(state.validate().is_ok(), "{kind:?} broke the game state");
            self.sync(state);
        }

        self.advance_all(left);
        fired
    }
}
