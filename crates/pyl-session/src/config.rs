//! Configuration for a game session.

/// Default period of the interest timer, in milliseconds.
pub const DEFAULT_INTEREST_INTERVAL_MS: u64 = 1000;

/// Default time a destroy request stays armed, in milliseconds.
pub const DEFAULT_CONFIRM_WINDOW_MS: u64 = 2000;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Period of the interest timer.
    pub interest_interval_ms: u64,
    /// How long a destroy request waits for confirmation.
    pub confirm_window_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            interest_interval_ms: DEFAULT_INTEREST_INTERVAL_MS,
            confirm_window_ms: DEFAULT_CONFIRM_WINDOW_MS,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the interest period (at least 1 ms).
    pub fn with_interest_interval_ms(mut self, ms: u64) -> Self {
        self.interest_interval_ms = ms.max(1);
        self
    }

    /// Set the destroy confirmation window.
    pub fn with_confirm_window_ms(mut self, ms: u64) -> Self {
        self.confirm_window_ms = ms;
        self
    }
}
