//! Core domain types shared by every Later Join crate.
//!
//! These are the values that flow between the host environment and the
//! engine: who a participant is, which team they belong to, and which
//! concrete role they play.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::TypeError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a participant in the session.
///
/// Newtype over the host's numeric account id. A participant keeps the
/// same id across disconnects, which is what makes the per-round
/// duplicate-join guard work.
///
/// `#[serde(transparent)]` keeps the JSON form a plain number, so
/// `ParticipantId(42)` is just `42` in event scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// A broad faction grouping.
///
/// The discriminants are the numeric team ids used by configuration
/// (`team_respawn_queue`, `filler_team_id`):
///
/// ```text
/// 0 SCP   1 NineTailedFox   2 ChaosInsurgency   3 Scientist
/// 4 ClassD   5 Spectator   6 Tutorial
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Scp,
    NineTailedFox,
    ChaosInsurgency,
    Scientist,
    ClassD,
    Spectator,
    Tutorial,
}

impl Team {
    /// Every team, ordered by id.
    pub const ALL: [Team; 7] = [
        Team::Scp,
        Team::NineTailedFox,
        Team::ChaosInsurgency,
        Team::Scientist,
        Team::ClassD,
        Team::Spectator,
        Team::Tutorial,
    ];

    /// The numeric id of this team.
    pub fn id(self) -> u8 {
        match self {
            Self::Scp => 0,
            Self::NineTailedFox => 1,
            Self::ChaosInsurgency => 2,
            Self::Scientist => 3,
            Self::ClassD => 4,
            Self::Spectator => 5,
            Self::Tutorial => 6,
        }
    }

    /// Looks up a team by numeric id. Returns `None` for unknown ids.
    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|team| i64::from(team.id()) == id)
    }

    /// Looks up a team by a single decimal digit, the unit of the
    /// respawn queue string. Non-digits and unknown ids yield `None`.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_id(i64::from(d)))
    }

    /// The role a participant receives when this team is picked,
    /// ignoring SCP (which draws from the role pool instead).
    pub fn default_role(self) -> Role {
        match self {
            Self::Scp => Role::Unassigned,
            Self::NineTailedFox => Role::FacilityGuard,
            Self::ChaosInsurgency => Role::ChaosInsurgency,
            Self::Scientist => Role::Scientist,
            Self::ClassD => Role::ClassD,
            Self::Spectator => Role::Spectator,
            Self::Tutorial => Role::Tutorial,
        }
    }
}

impl TryFrom<i64> for Team {
    type Error = TypeError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(TypeError::UnknownTeam(id))
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scp => "SCP",
            Self::NineTailedFox => "NineTailedFox",
            Self::ChaosInsurgency => "ChaosInsurgency",
            Self::Scientist => "Scientist",
            Self::ClassD => "ClassD",
            Self::Spectator => "Spectator",
            Self::Tutorial => "Tutorial",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A concrete playable role.
///
/// `Unassigned` is a sentinel meaning "no role could be resolved"; it
/// never reaches the game world. `Spectator` is the non-playing role the
/// engine falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Scp049,
    Scp096,
    Scp106,
    Scp173,
    #[serde(rename = "scp939_53")]
    Scp939_53,
    #[serde(rename = "scp939_89")]
    Scp939_89,
    FacilityGuard,
    NtfCadet,
    NtfScientist,
    ChaosInsurgency,
    Scientist,
    ClassD,
    Tutorial,
    Spectator,
    Unassigned,
}

impl Role {
    /// The SCP roles that can be placed in the role pool, in the order
    /// their configuration prefixes are read.
    pub const SCPS: [Role; 6] = [
        Role::Scp049,
        Role::Scp096,
        Role::Scp106,
        Role::Scp173,
        Role::Scp939_53,
        Role::Scp939_89,
    ];

    /// The SCP that becomes unavailable once the light containment area
    /// is decontaminated (it spawns inside that area).
    pub const DECONTAMINATION_AFFECTED: Role = Role::Scp173;

    /// The team this role belongs to. `None` only for `Unassigned`.
    pub fn team(self) -> Option<Team> {
        let team = match self {
            Self::Scp049
            | Self::Scp096
            | Self::Scp106
            | Self::Scp173
            | Self::Scp939_53
            | Self::Scp939_89 => Team::Scp,
            Self::FacilityGuard | Self::NtfCadet | Self::NtfScientist => Team::NineTailedFox,
            Self::ChaosInsurgency => Team::ChaosInsurgency,
            Self::Scientist => Team::Scientist,
            Self::ClassD => Team::ClassD,
            Self::Tutorial => Team::Tutorial,
            Self::Spectator => Team::Spectator,
            Self::Unassigned => return None,
        };
        Some(team)
    }

    /// Returns `true` for SCP variants.
    pub fn is_scp(self) -> bool {
        self.team() == Some(Team::Scp)
    }

    /// Returns `true` for roles that actually play (not spectator and
    /// not the unassigned sentinel).
    pub fn is_playable(self) -> bool {
        !matches!(self, Self::Spectator | Self::Unassigned)
    }

    /// The configuration prefix for an SCP role (`scp049`, `scp939_53`, ...).
    pub fn config_prefix(self) -> Option<&'static str> {
        match self {
            Self::Scp049 => Some("scp049"),
            Self::Scp096 => Some("scp096"),
            Self::Scp106 => Some("scp106"),
            Self::Scp173 => Some("scp173"),
            Self::Scp939_53 => Some("scp939_53"),
            Self::Scp939_89 => Some("scp939_89"),
            _ => None,
        }
    }

    /// Looks up an SCP role by its configuration prefix.
    ///
    /// # Errors
    /// Returns [`TypeError::UnknownRolePrefix`] if no SCP role uses `prefix`.
    pub fn from_config_prefix(prefix: &str) -> Result<Self, TypeError> {
        Self::SCPS
            .into_iter()
            .find(|role| role.config_prefix() == Some(prefix))
            .ok_or_else(|| TypeError::UnknownRolePrefix(prefix.to_string()))
    }
}

impl FromStr for Role {
    type Err = TypeError;

    /// Parses the snake_case role name used in scripts and logs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| TypeError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scp049 => "SCP-049",
            Self::Scp096 => "SCP-096",
            Self::Scp106 => "SCP-106",
            Self::Scp173 => "SCP-173",
            Self::Scp939_53 => "SCP-939-53",
            Self::Scp939_89 => "SCP-939-89",
            Self::FacilityGuard => "FacilityGuard",
            Self::NtfCadet => "NtfCadet",
            Self::NtfScientist => "NtfScientist",
            Self::ChaosInsurgency => "ChaosInsurgency",
            Self::Scientist => "Scientist",
            Self::ClassD => "ClassD",
            Self::Tutorial => "Tutorial",
            Self::Spectator => "Spectator",
            Self::Unassigned => "Unassigned",
        };
        f.write_str(name)
    }
}
