//! Round phases and the round clock they drive.

use std::fmt;
use std::time::Duration;

use laterjoin_window::RoundClock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Round-end events fired within this long after round start are
/// ignored, and role-set events later than this count as stragglers.
pub const ROUND_GRACE: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// RoundPhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of the current round.
///
/// ```text
/// WaitingForPlayers → PreRound → InProgress → Ended → WaitingForPlayers
/// ```
///
/// - **WaitingForPlayers**: lobby; round state has just been reset.
/// - **PreRound**: countdown before the round; the round has not
///   actually started yet.
/// - **InProgress**: the round is running and the spawn window is armed.
/// - **Ended**: the round is over; spawns are closed until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    WaitingForPlayers,
    PreRound,
    InProgress,
    Ended,
}

impl RoundPhase {
    /// The phase that normally follows this one.
    pub fn next(self) -> Self {
        match self {
            Self::WaitingForPlayers => Self::PreRound,
            Self::PreRound => Self::InProgress,
            Self::InProgress => Self::Ended,
            Self::Ended => Self::WaitingForPlayers,
        }
    }

    /// Returns `true` if `target` normally follows this phase.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == target
    }

    /// Whether the actual round has started (it may have ended since).
    pub fn has_round_started(self) -> bool {
        matches!(self, Self::InProgress | Self::Ended)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingForPlayers => write!(f, "WaitingForPlayers"),
            Self::PreRound => write!(f, "PreRound"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoundLifecycle
// ---------------------------------------------------------------------------

/// Current phase plus the clock measuring the running round.
#[derive(Debug, Clone)]
pub struct RoundLifecycle {
    phase: RoundPhase,
    clock: RoundClock,
}

impl Default for RoundLifecycle {
    fn default() -> Self {
        Self {
            phase: RoundPhase::WaitingForPlayers,
            clock: RoundClock::new(),
        }
    }
}

impl RoundLifecycle {
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    /// Moves to `target` and updates the clock for it.
    ///
    /// The host is authoritative about phases, so an out-of-order
    /// transition is logged and applied anyway.
    pub fn enter(&mut self, target: RoundPhase) {
        if !self.phase.can_transition_to(target) {
            debug!(from = %self.phase, to = %target, "out-of-order phase transition");
        }
        match target {
            RoundPhase::WaitingForPlayers => self.clock.reset(),
            RoundPhase::PreRound => {}
            RoundPhase::InProgress => self.clock.start(),
            RoundPhase::Ended => self.clock.stop(),
        }
        self.phase = target;
    }

    /// Whether the round has been running longer than [`ROUND_GRACE`].
    pub fn past_grace(&self) -> bool {
        self.clock.has_exceeded(ROUND_GRACE)
    }

    /// Whether initial role assignment may still be happening: the round
    /// has not started, or started no more than [`ROUND_GRACE`] ago.
    pub fn is_settling(&self) -> bool {
        match self.phase {
            RoundPhase::WaitingForPlayers | RoundPhase::PreRound => true,
            RoundPhase::InProgress => !self.past_grace(),
            RoundPhase::Ended => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_phase_cycle() {
        assert_eq!(RoundPhase::WaitingForPlayers.next(), RoundPhase::PreRound);
        assert_eq!(RoundPhase::PreRound.next(), RoundPhase::InProgress);
        assert_eq!(RoundPhase::InProgress.next(), RoundPhase::Ended);
        assert_eq!(RoundPhase::Ended.next(), RoundPhase::WaitingForPlayers);
    }

    #[test]
    fn test_round_phase_can_transition_to() {
        assert!(RoundPhase::PreRound.can_transition_to(RoundPhase::InProgress));
        assert!(!RoundPhase::WaitingForPlayers.can_transition_to(RoundPhase::Ended));
    }

    #[test]
    fn test_round_phase_has_started() {
        assert!(!RoundPhase::WaitingForPlayers.has_round_started());
        assert!(!RoundPhase::PreRound.has_round_started());
        assert!(RoundPhase::InProgress.has_round_started());
        assert!(RoundPhase::Ended.has_round_started());
    }

    #[test]
    fn test_round_phase_display() {
        assert_eq!(RoundPhase::InProgress.to_string(), "InProgress");
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifecycle_settling_window() {
        let mut lifecycle = RoundLifecycle::default();
        assert!(lifecycle.is_settling());

        lifecycle.enter(RoundPhase::PreRound);
        lifecycle.enter(RoundPhase::InProgress);
        assert!(lifecycle.is_settling());
        assert!(!lifecycle.past_grace());

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(lifecycle.past_grace());
        assert!(!lifecycle.is_settling());

        lifecycle.enter(RoundPhase::Ended);
        assert!(!lifecycle.clock().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_resets_clock() {
        let mut lifecycle = RoundLifecycle::default();
        lifecycle.enter(RoundPhase::InProgress);
        tokio::time::advance(Duration::from_secs(30)).await;
        lifecycle.enter(RoundPhase::WaitingForPlayers);
        assert!(!lifecycle.past_grace());
    }
}
