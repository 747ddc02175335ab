//! Team rotation: which team the next spawn is offered from.

use laterjoin_types::Team;
use rand::Rng;
use tracing::warn;

/// Extra entries appended to the smart picker's working list.
pub const SMART_BIAS: [Team; 6] = [
    Team::Scp,
    Team::ChaosInsurgency,
    Team::ClassD,
    Team::ClassD,
    Team::Scientist,
    Team::NineTailedFox,
];

// ---------------------------------------------------------------------------
// RespawnQueue
// ---------------------------------------------------------------------------

/// Fixed sequence of team ids, consumed positionally.
///
/// Entries that name no team are kept as `None` so that positions stay
/// aligned with the configured string; resolving such an entry yields no
/// role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RespawnQueue {
    entries: Vec<Option<Team>>,
}

impl RespawnQueue {
    /// Parses one team id per character, e.g. `"4014"`.
    pub fn parse(ids: &str) -> Self {
        let entries = ids
            .chars()
            .enumerate()
            .map(|(position, c)| {
                let team = Team::from_digit(c);
                if team.is_none() {
                    warn!(position, id = %c, "respawn queue entry names no team");
                }
                team
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Option<Team>> {
        self.entries.get(index).copied()
    }

    pub fn entries(&self) -> &[Option<Team>] {
        &self.entries
    }
}

// ---------------------------------------------------------------------------
// TeamPicker
// ---------------------------------------------------------------------------

/// Chooses the team for each resolution attempt.
///
/// - **Queue mode** (default): the n-th grant of the round takes
///   `queue[n]`; once the queue is exhausted every grant takes the filler
///   team.
/// - **Smart mode**: the queue minus one entry per team already granted,
///   plus [`SMART_BIAS`], sampled uniformly. Only the first matching
///   entry is dropped for each granted team, and the bias list skews the
///   result towards class-D. This is a coarse heuristic and is kept as
///   such.
#[derive(Debug, Clone)]
pub struct TeamPicker {
    queue: RespawnQueue,
    filler: Option<Team>,
    smart: bool,
}

impl TeamPicker {
    pub fn new(queue: RespawnQueue, filler: Option<Team>, smart: bool) -> Self {
        Self {
            queue,
            filler,
            smart,
        }
    }

    pub fn queue(&self) -> &RespawnQueue {
        &self.queue
    }

    pub fn is_smart(&self) -> bool {
        self.smart
    }

    /// Picks the next team given the teams granted so far this round.
    ///
    /// `None` means the chosen entry names no team.
    pub fn next_team<R: Rng + ?Sized>(&self, granted: &[Team], rng: &mut R) -> Option<Team> {
        if self.smart {
            return self.next_team_smart(granted, rng);
        }

        match self.queue.get(granted.len()) {
            Some(entry) => entry,
            // Overflow: queue exhausted.
            None => self.filler,
        }
    }

    fn next_team_smart<R: Rng + ?Sized>(&self, granted: &[Team], rng: &mut R) -> Option<Team> {
        let mut working: Vec<Option<Team>> = self.queue.entries().to_vec();
        for team in granted {
            if let Some(index) = working.iter().position(|entry| *entry == Some(*team)) {
                working.remove(index);
            }
        }
        working.extend(SMART_BIAS.map(Some));

        working[rng.random_range(0..working.len())]
    }
}
