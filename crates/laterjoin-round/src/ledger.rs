//! Per-round record of who has already been given a spawn.

use std::collections::{HashMap, HashSet};

use laterjoin_types::{ParticipantId, Role, Team};

/// Participants and teams granted a spawn this round.
///
/// A participant appears at most once per round. The granted teams are
/// kept in grant order; their count is the rotation index into the
/// respawn queue.
///
/// Separately, the ledger remembers the last playable role each
/// participant is known to hold, so a role reported twice (the host
/// echoing a grant, or a repeated event) is only accounted once.
#[derive(Debug, Clone, Default)]
pub struct SpawnLedger {
    participants: HashSet<ParticipantId>,
    teams: Vec<Team>,
    held: HashMap<ParticipantId, Role>,
}

impl SpawnLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a grant. Returns `false`, recording nothing, if the
    /// participant already spawned this round.
    pub fn try_grant(&mut self, participant: ParticipantId, team: Team) -> bool {
        if !self.participants.insert(participant) {
            return false;
        }
        self.teams.push(team);
        true
    }

    /// Notes that `participant` now holds `role`. Returns `false` if that
    /// was already known.
    pub fn note_role(&mut self, participant: ParticipantId, role: Role) -> bool {
        self.held.insert(participant, role) != Some(role)
    }

    /// The last role noted for `participant` this round.
    pub fn held_role(&self, participant: ParticipantId) -> Option<Role> {
        self.held.get(&participant).copied()
    }

    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.participants.contains(&participant)
    }

    /// Teams granted so far, oldest first.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn reset(&mut self) {
        self.participants.clear();
        self.teams.clear();
        self.held.clear();
    }
}
