//! Two-step confirmation for destroying a die.
//!
//! The first request arms the gate for one die; a second request for the
//! same die before the window closes confirms. This lives beside the game
//! state, never inside it.

use pyl_core::DieId;

/// Result of a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The gate is now armed and waits for a repeat.
    Armed,
    /// The request repeated an armed one in time.
    Confirmed,
}

/// An auto-expiring arming flag keyed by die.
#[derive(Debug, Clone)]
pub struct ConfirmGate {
    window_ms: u64,
    armed: Option<(DieId, u64)>,
}

impl ConfirmGate {
    /// Create a gate whose arming lasts `window_ms`.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            armed: None,
        }
    }

    /// Register a request for `die` at time `now_ms`.
    pub fn request(&mut self, die: DieId, now_ms: u64) -> Confirmation {
        if self.is_armed(die, now_ms) {
            self.armed = None;
            return Confirmation::Confirmed;
        }
        self.armed = Some((die, now_ms.saturating_add(self.window_ms)));
        Confirmation::Armed
    }

    /// Whether a request for `die` is waiting at `now_ms`.
    pub fn is_armed(&self, die: DieId, now_ms: u64) -> bool {
        matches!(self.armed, Some((id, expires)) if id == die && now_ms < expires)
    }

    /// Forget any pending request.
    pub fn disarm(&mut self) {
        self.armed = None;
    }
}
