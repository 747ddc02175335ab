//! Host events and the dispatcher interface that consumes them.

use laterjoin_types::{ParticipantId, Role};
use serde::{Deserialize, Serialize};

use crate::Host;

/// What happened to a join attempt.
///
/// None of these are errors; they exist so callers and tests can see
/// which branch was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnOutcome {
    /// The participant received this role.
    Granted(Role),
    /// The round has not started and pre-round exploring is off; the host
    /// assigns the role itself at round start.
    Deferred,
    /// The spawn window is closed; forced to spectator.
    WindowClosed,
    /// Already spawned this round; forced to spectator.
    Duplicate,
    /// No role could be resolved; forced to spectator.
    Unlucky,
    /// The engine is disabled for this round; nothing was done.
    Disabled,
}

/// Whether an item pickup may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupVerdict {
    Allow,
    Deny,
}

/// An event raised by the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    WaitingForPlayers,
    PreRoundStart,
    RoundStart,
    RoundEnd,
    ParticipantJoin { participant: ParticipantId },
    /// The host assigned `role` to `participant`.
    ParticipantRoleSet { participant: ParticipantId, role: Role },
    ItemPickupAttempt { participant: ParticipantId },
    Decontaminate,
    Detonate,
}

/// The handler's answer to an event, for events that have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum EventReply {
    Ack,
    Spawn { outcome: SpawnOutcome },
    /// The role the engine overrode a host assignment with, if any.
    RoleOverride { role: Option<Role> },
    Pickup { verdict: PickupVerdict },
}

/// One handler method per event kind.
///
/// Called synchronously, one event at a time, from a single thread.
/// Handlers must not block.
pub trait RoundEventHandler {
    fn on_waiting_for_players(&mut self, host: &mut dyn Host);

    fn on_pre_round_start(&mut self, host: &mut dyn Host);

    fn on_round_start(&mut self, host: &mut dyn Host);

    fn on_round_end(&mut self, host: &mut dyn Host);

    fn on_participant_join(&mut self, host: &mut dyn Host, participant: ParticipantId) -> SpawnOutcome;

    /// Returns the role the engine replaced the host's choice with.
    fn on_role_set(&mut self, host: &mut dyn Host, participant: ParticipantId, role: Role) -> Option<Role>;

    fn on_item_pickup(&mut self, host: &mut dyn Host, participant: ParticipantId) -> PickupVerdict;

    fn on_decontaminate(&mut self, host: &mut dyn Host);

    fn on_detonate(&mut self, host: &mut dyn Host);
}

impl RoundEvent {
    /// Routes this event to the matching handler method.
    pub fn dispatch<E: RoundEventHandler + ?Sized>(self, handler: &mut E, host: &mut dyn Host) -> EventReply {
        match self {
            Self::WaitingForPlayers => handler.on_waiting_for_players(host),
            Self::PreRoundStart => handler.on_pre_round_start(host),
            Self::RoundStart => handler.on_round_start(host),
            Self::RoundEnd => handler.on_round_end(host),
            Self::ParticipantJoin { participant } => {
                let outcome = handler.on_participant_join(host, participant);
                return EventReply::Spawn { outcome };
            }
            Self::ParticipantRoleSet { participant, role } => {
                let role = handler.on_role_set(host, participant, role);
                return EventReply::RoleOverride { role };
            }
            Self::ItemPickupAttempt { participant } => {
                let verdict = handler.on_item_pickup(host, participant);
                return EventReply::Pickup { verdict };
            }
            Self::Decontaminate => handler.on_decontaminate(host),
            Self::Detonate => handler.on_detonate(host),
        }
        EventReply::Ack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_event_json_format() {
        let event: RoundEvent =
            serde_json::from_str(r#"{"event": "participant_role_set", "participant": 3, "role": "spectator"}"#)
                .unwrap();
        assert_eq!(
            event,
            RoundEvent::ParticipantRoleSet {
                participant: ParticipantId(3),
                role: Role::Spectator
            }
        );

        let event: RoundEvent = serde_json::from_str(r#"{"event": "round_start"}"#).unwrap();
        assert_eq!(event, RoundEvent::RoundStart);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result: Result<RoundEvent, _> = serde_json::from_str(r#"{"event": "meteor_strike"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_spawn_outcome_json_format() {
        let json = serde_json::to_string(&SpawnOutcome::Granted(Role::ClassD)).unwrap();
        assert_eq!(json, r#"{"granted":"class_d"}"#);
        let json = serde_json::to_string(&SpawnOutcome::Unlucky).unwrap();
        assert_eq!(json, r#""unlucky""#);
    }
}
