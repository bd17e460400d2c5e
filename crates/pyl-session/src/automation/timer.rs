//! A restartable fixed-period timer driven by explicit elapsed time.

/// A periodic timer that fires every `period_ms` of advanced time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicTimer {
    period_ms: u64,
    elapsed_ms: u64,
}

impl PeriodicTimer {
    /// Start a timer with a fresh phase. Periods below 1 ms are raised to 1.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// The firing period.
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Time left until the next firing.
    pub fn remaining_ms(&self) -> u64 {
        self.period_ms.saturating_sub(self.elapsed_ms)
    }

    /// Move the timer forward, stopping at the deadline.
    pub fn advance(&mut self, ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms).min(self.period_ms);
    }

    /// Whether the deadline has been reached.
    pub fn is_due(&self) -> bool {
        self.elapsed_ms >= self.period_ms
    }

    /// Begin the next period after a firing.
    pub fn rearm(&mut self) {
        self.elapsed_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_period() {
        let mut t = PeriodicTimer::new(100);
        t.advance(60);
        assert!(!t.is_due());
        assert_eq!(t.remaining_ms(), 40);
        t.advance(40);
        assert!(t.is_due());
        t.rearm();
        assert_eq!(t.remaining_ms(), 100);
    }

    #[test]
    fn advance_stops_at_deadline() {
        let mut t = PeriodicTimer::new(10);
        t.advance(1000);
        assert!(t.is_due());
        assert_eq!(t.remaining_ms(), 0);
    }

    #[test]
    fn zero_period_raised() {
        assert_eq!(PeriodicTimer::new(0).period_ms(), 1);
    }
}
