//! In-round hazards and the role restrictions they impose.

use laterjoin_types::Role;
use serde::{Deserialize, Serialize};

/// Hazards triggered so far this round.
///
/// Both flags start `false` and, once set, stay set until
/// [`reset`](Self::reset) at the next round. There is deliberately no
/// way to clear a single flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardState {
    decontaminated: bool,
    detonated: bool,
}

impl HazardState {
    /// The light containment area has been decontaminated.
    pub fn is_decontaminated(&self) -> bool {
        self.decontaminated
    }

    /// The warhead has detonated.
    pub fn is_detonated(&self) -> bool {
        self.detonated
    }

    pub fn mark_decontaminated(&mut self) {
        self.decontaminated = true;
    }

    pub fn mark_detonated(&mut self) {
        self.detonated = true;
    }

    /// Clears both flags. Only called at round reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adjusts a candidate role for the current hazards.
    ///
    /// See [`adjust_role`].
    pub fn adjust(&self, role: Role) -> Role {
        adjust_role(role, *self)
    }
}

/// Maps a candidate role to the role actually available under `hazards`,
/// or [`Role::Unassigned`] if it is no longer available.
///
/// After detonation the facility is gone: guards arrive as NTF cadets,
/// scientists as NTF scientists, class-D as chaos insurgents, and no SCP
/// or tutorial can spawn. After decontamination only the light
/// containment roles are affected.
pub fn adjust_role(role: Role, hazards: HazardState) -> Role {
    if hazards.detonated {
        return match role {
            Role::FacilityGuard => Role::NtfCadet,
            Role::Scientist => Role::NtfScientist,
            Role::ClassD => Role::ChaosInsurgency,
            Role::Tutorial => Role::Unassigned,
            scp if scp.is_scp() => Role::Unassigned,
            other => other,
        };
    }

    if hazards.decontaminated {
        return match role {
            Role::Scientist => Role::NtfScientist,
            Role::ClassD => Role::ChaosInsurgency,
            Role::Tutorial | Role::DECONTAMINATION_AFFECTED => Role::Unassigned,
            other => other,
        };
    }

    role
}
