//! Elapsed-time tracking for a single round.

use std::time::Duration;

use tokio::time::Instant;

/// Stopwatch for the current round.
///
/// Uses Tokio's clock so that tests running with a paused runtime see
/// the same time the window timer does.
#[derive(Debug, Clone, Default)]
pub struct RoundClock {
    started: Option<Instant>,
    /// Frozen elapsed time once stopped.
    stopped: Option<Duration>,
}

impl RoundClock {
    /// Creates a clock that has not started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) timing from now.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.stopped = None;
    }

    /// Freezes the elapsed time. No-op if the clock is not running.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.stopped = Some(self.elapsed());
        }
    }

    /// Back to zero, not running.
    pub fn reset(&mut self) {
        self.started = None;
        self.stopped = None;
    }

    /// Whether the clock is currently running.
    pub fn is_running(&self) -> bool {
        self.started.is_some() && self.stopped.is_none()
    }

    /// Time since [`start`](Self::start), or the frozen value after
    /// [`stop`](Self::stop). Zero if never started.
    pub fn elapsed(&self) -> Duration {
        match (self.started, self.stopped) {
            (_, Some(frozen)) => frozen,
            (Some(start), None) => start.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    /// Whether more than `threshold` has elapsed.
    pub fn has_exceeded(&self, threshold: Duration) -> bool {
        self.elapsed() > threshold
    }
}
