//! The host environment: where the engine's decisions take effect.
//!
//! The engine never touches the game world itself. It asks the host to
//! change a participant's role or to lock a door, and assumes the call
//! succeeds.

use laterjoin_types::{ParticipantId, Role};
use serde::{Deserialize, Serialize};

/// Side effects the engine requests from the game server.
///
/// `Send + 'static` so a host can be moved into the driver task.
pub trait Host: Send + 'static {
    /// Forces `participant` into `role`.
    fn change_role(&mut self, participant: ParticipantId, role: Role);

    /// Locks or unlocks a named door.
    fn set_door_locked(&mut self, door: &str, locked: bool);
}

/// One side effect, as recorded by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum HostEffect {
    RoleChanged { participant: ParticipantId, role: Role },
    DoorLocked { door: String, locked: bool },
}

/// A host that records every requested side effect.
///
/// Used by tests and by the scripted replay demo.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    effects: Vec<HostEffect>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[HostEffect] {
        &self.effects
    }

    /// Removes and returns everything recorded so far.
    pub fn take_effects(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.effects)
    }

    /// The last role the host was asked to give `participant`.
    pub fn role_of(&self, participant: ParticipantId) -> Option<Role> {
        self.effects.iter().rev().find_map(|effect| match effect {
            HostEffect::RoleChanged {
                participant: p,
                role,
            } if *p == participant => Some(*role),
            _ => None,
        })
    }
}

impl Host for RecordingHost {
    fn change_role(&mut self, participant: ParticipantId, role: Role) {
        self.effects
            .push(HostEffect::RoleChanged { participant, role });
    }

    fn set_door_locked(&mut self, door: &str, locked: bool) {
        self.effects.push(HostEffect::DoorLocked {
            door: door.to_string(),
            locked,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_tracks_latest_role() {
        let mut host = RecordingHost::new();
        host.change_role(ParticipantId(1), Role::ClassD);
        host.set_door_locked("106_PRIMARY", true);
        host.change_role(ParticipantId(1), Role::Spectator);
        assert_eq!(host.role_of(ParticipantId(1)), Some(Role::Spectator));
        assert_eq!(host.role_of(ParticipantId(2)), None);
        assert_eq!(host.effects().len(), 3);
    }

    #[test]
    fn test_take_effects_drains() {
        let mut host = RecordingHost::new();
        host.set_door_locked("gate", false);
        let effects = host.take_effects();
        assert_eq!(
            effects,
            vec![HostEffect::DoorLocked {
                door: "gate".into(),
                locked: false
            }]
        );
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_host_effect_json_format() {
        let effect = HostEffect::RoleChanged {
            participant: ParticipantId(9),
            role: Role::NtfCadet,
        };
        let json: serde_json::Value = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["effect"], "role_changed");
        assert_eq!(json["participant"], 9);
        assert_eq!(json["role"], "ntf_cadet");
    }
}
