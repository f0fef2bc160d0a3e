use std::time::{Duration, Instant};

use tracing::debug;

/// Fixed-rate tick pacing.
///
/// Measures time since the current tick started and sleeps whatever is left
/// of the budget. An overrun starts the next tick immediately; there is no
/// catch-up, so the simulation can fall behind but never runs ahead.
#[derive(Clone, Debug)]
pub struct TickPacer {
    budget: Duration,
    tick_start: Instant,
}

impl TickPacer {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            tick_start: Instant::now(),
        }
    }

    /// Zero budget: never sleeps
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Budget left in the current tick as of `now`, zero once overrun
    pub fn remaining(&self, now: Instant) -> Duration {
        self.budget.saturating_sub(now.saturating_duration_since(self.tick_start))
    }

    /// Sleep out the rest of the current tick, then start the next one.
    /// Returns how long it slept.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        let remaining = self.remaining(now);
        if remaining.is_zero() {
            if !self.budget.is_zero() {
                debug!(
                    overrun_ms = (now - self.tick_start).saturating_sub(self.budget).as_secs_f64() * 1000.0,
                    "tick exceeded its budget"
                );
            }
        } else {
            std::thread::sleep(remaining);
        }
        self.tick_start = Instant::now();
        remaining
    }
}
