//! Session runner for the push-your-luck dice game.
//!
//! Wraps a [`pyl_core::GameState`] with the pieces a front-end needs: a
//! seeded RNG for rolls, automation timers for the auto-roller and
//! interest, a two-step destroy confirmation, a short text command surface
//! and an optional tokio task that drives the timers in real time.

pub mod automation;
pub mod command;
pub mod config;
pub mod confirm;
pub mod driver;
pub mod error;
pub mod session;

pub use automation::{Automation, Firings, PeriodicTimer, TimerKind};
pub use command::{Command, MAX_WAIT_MS};
pub use config::SessionConfig;
pub use confirm::{ConfirmGate, Confirmation};
pub use driver::{DriverHandle, spawn_driver};
pub use error::{SessionError, SessionResult};
pub use session::{DestroyRequest, GameSession};
