//! Resolving one concrete role for one participant.

use laterjoin_types::{Role, Team};
use rand::Rng;
use tracing::trace;

use crate::{HazardState, RolePool, TeamPicker};

/// Resolution attempts before giving up. The first attempt counts.
pub const MAX_ATTEMPTS: usize = 5;

/// Maps a picked team to a candidate role before hazards are applied.
///
/// SCP draws a random entry from the pool (without consuming it). A team
/// id that names no team yields [`Role::Unassigned`].
pub fn role_for_team<R: Rng + ?Sized>(team: Option<Team>, pool: &RolePool, rng: &mut R) -> Role {
    match team {
        Some(Team::Scp) => pool.pick(rng).unwrap_or(Role::Unassigned),
        Some(team) => team.default_role(),
        None => Role::Unassigned,
    }
}

/// Borrowed view of the round state needed to resolve a role.
///
/// Nothing is mutated here: the pool entry and ledger slot are only
/// consumed once the caller actually grants the role.
#[derive(Debug, Clone, Copy)]
pub struct RoleAssigner<'a> {
    pub picker: &'a TeamPicker,
    pub pool: &'a RolePool,
    pub hazards: HazardState,
    pub granted: &'a [Team],
}

/// The role a resolution settled on and how many attempts it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub role: Role,
    pub attempts: usize,
}

impl RoleAssigner<'_> {
    /// Picks a team, maps it to a role and adjusts it for hazards, up to
    /// [`MAX_ATTEMPTS`] times.
    ///
    /// Returns [`Role::Unassigned`] when every attempt came up empty. That
    /// is an expected outcome, not an error: the caller parks the
    /// participant as a spectator.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Role {
        self.resolve_with_attempts(rng).role
    }

    /// Like [`resolve`](Self::resolve), also reporting the attempt count.
    pub fn resolve_with_attempts<R: Rng + ?Sized>(&self, rng: &mut R) -> Resolution {
        for attempt in 1..=MAX_ATTEMPTS {
            let team = self.picker.next_team(self.granted, rng);
            let candidate = role_for_team(team, self.pool, rng);
            let role = self.hazards.adjust(candidate);
            trace!(attempt, ?team, %candidate, %role, "role resolution attempt");
            if role != Role::Unassigned {
                return Resolution { role, attempts: attempt };
            }
        }
        Resolution {
            role: Role::Unassigned,
            attempts: MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RespawnQueue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn picker(queue: &str) -> TeamPicker {
        TeamPicker::new(RespawnQueue::parse(queue), Some(Team::ClassD), false)
    }

    #[test]
    fn test_role_for_team_mapping() {
        let pool = RolePool::new(vec![Role::Scp106]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(role_for_team(Some(Team::Scp), &pool, &mut rng), Role::Scp106);
        assert_eq!(role_for_team(Some(Team::NineTailedFox), &pool, &mut rng), Role::FacilityGuard);
        assert_eq!(role_for_team(Some(Team::Tutorial), &pool, &mut rng), Role::Tutorial);
        assert_eq!(role_for_team(None, &pool, &mut rng), Role::Unassigned);
    }

    #[test]
    fn test_scp_with_empty_pool_is_unassigned() {
        let pool = RolePool::new(vec![]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(role_for_team(Some(Team::Scp), &pool, &mut rng), Role::Unassigned);
    }

    #[test]
    fn test_resolve_uses_queue_position() {
        let picker = picker("401");
        let pool = RolePool::new(vec![Role::Scp049]);
        let mut rng = StdRng::seed_from_u64(3);
        let assigner = RoleAssigner {
            picker: &picker,
            pool: &pool,
            hazards: HazardState::default(),
            granted: &[Team::ClassD],
        };
        assert_eq!(assigner.resolve(&mut rng), Role::Scp049);
    }

    #[test]
    fn test_resolve_exhausts_attempts_on_empty_pool() {
        // Every attempt lands on SCP with nothing left in the pool.
        let picker = TeamPicker::new(RespawnQueue::parse(""), Some(Team::Scp), false);
        let pool = RolePool::new(vec![]);
        let mut rng = StdRng::seed_from_u64(3);
        let assigner = RoleAssigner {
            picker: &picker,
            pool: &pool,
            hazards: HazardState::default(),
            granted: &[],
        };
        assert_eq!(
            assigner.resolve_with_attempts(&mut rng),
            Resolution {
                role: Role::Unassigned,
                attempts: MAX_ATTEMPTS
            }
        );
    }

    #[test]
    fn test_resolve_stops_at_first_success() {
        let picker = picker("4");
        let pool = RolePool::new(vec![]);
        let mut rng = StdRng::seed_from_u64(3);
        let assigner = RoleAssigner {
            picker: &picker,
            pool: &pool,
            hazards: HazardState::default(),
            granted: &[],
        };
        assert_eq!(
            assigner.resolve_with_attempts(&mut rng),
            Resolution {
                role: Role::ClassD,
                attempts: 1
            }
        );
    }

    #[test]
    fn test_resolve_gives_up_on_unknown_queue_entry() {
        let picker = TeamPicker::new(RespawnQueue::parse("9"), None, false);
        let pool = RolePool::new(Role::SCPS.to_vec());
        let mut rng = StdRng::seed_from_u64(3);
        let assigner = RoleAssigner {
            picker: &picker,
            pool: &pool,
            hazards: HazardState::default(),
            granted: &[],
        };
        let resolution = assigner.resolve_with_attempts(&mut rng);
        assert_eq!(resolution.role, Role::Unassigned);
        assert_eq!(resolution.attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn test_resolve_smart_attempts_are_bounded() {
        // After detonation only SCP draws fail, so smart mode retries
        // sometimes but never beyond the limit.
        let picker = TeamPicker::new(RespawnQueue::parse("000"), Some(Team::ClassD), true);
        let pool = RolePool::new(Role::SCPS.to_vec());
        let mut hazards = HazardState::default();
        hazards.mark_detonated();
        let mut rng = StdRng::seed_from_u64(5);
        let assigner = RoleAssigner {
            picker: &picker,
            pool: &pool,
            hazards,
            granted: &[],
        };

        let mut retried = 0;
        for _ in 0..200 {
            let resolution = assigner.resolve_with_attempts(&mut rng);
            assert!((1..=MAX_ATTEMPTS).contains(&resolution.attempts));
            if resolution.role == Role::Unassigned {
                assert_eq!(resolution.attempts, MAX_ATTEMPTS);
            }
            if resolution.attempts > 1 {
                retried += 1;
            }
        }
        assert!(retried > 0);
    }

    #[test]
    fn test_resolve_after_detonation_upgrades_guards() {
        let picker = picker("1");
        let pool = RolePool::new(vec![]);
        let mut hazards = HazardState::default();
        hazards.mark_detonated();
        let mut rng = StdRng::seed_from_u64(3);
        let assigner = RoleAssigner {
            picker: &picker,
            pool: &pool,
            hazards,
            granted: &[],
        };
        for _ in 0..20 {
            assert_eq!(assigner.resolve(&mut rng), Role::NtfCadet);
        }
    }

    #[test]
    fn test_resolve_smart_retries_past_unavailable_roles() {
        // Smart mode can land on SCP (from the bias list) with an empty
        // pool; retries should still find something most of the time.
        let picker = TeamPicker::new(RespawnQueue::parse(""), Some(Team::ClassD), true);
        let pool = RolePool::new(vec![]);
        let mut rng = StdRng::seed_from_u64(11);
        let assigner = RoleAssigner {
            picker: &picker,
            pool: &pool,
            hazards: HazardState::default(),
            granted: &[],
        };
        let resolved = (0..50).filter(|_| assigner.resolve(&mut rng) != Role::Unassigned).count();
        assert!(resolved > 40);
    }
}
