//! The pool of SCP roles still available this round.

use laterjoin_types::Role;
use rand::Rng;

/// Multiset of SCP roles that may still be handed out.
///
/// Refilled from the configured roster at each round reset and only ever
/// shrinks in between: a role leaves the pool when it is granted or when
/// a hazard makes it unavailable.
#[derive(Debug, Clone, Default)]
pub struct RolePool {
    roster: Vec<Role>,
    roles: Vec<Role>,
}

impl RolePool {
    /// Creates a pool filled from `roster`.
    pub fn new(roster: Vec<Role>) -> Self {
        Self {
            roles: roster.clone(),
            roster,
        }
    }

    /// Replaces the roster used by the next [`reset`](Self::reset). The
    /// current round's pool is left alone.
    pub fn set_roster(&mut self, roster: Vec<Role>) {
        self.roster = roster;
    }

    /// Refills the pool from the roster.
    pub fn reset(&mut self) {
        self.roles.clone_from(&self.roster);
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Picks a uniformly random entry without removing it. Every entry,
    /// the last one included, is reachable.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Role> {
        if self.roles.is_empty() {
            return None;
        }
        Some(self.roles[rng.random_range(0..self.roles.len())])
    }

    /// Removes one occurrence of `role`. Returns `true` if one was present.
    pub fn remove_one(&mut self, role: Role) -> bool {
        match self.roles.iter().position(|r| *r == role) {
            Some(index) => {
                self.roles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every occurrence of `role`. Returns how many were removed.
    pub fn remove_all(&mut self, role: Role) -> usize {
        let before = self.roles.len();
        self.roles.retain(|r| *r != role);
        before - self.roles.len()
    }

    /// Empties the pool for the rest of the round.
    pub fn clear(&mut self) {
        self.roles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pick_from_empty_pool() {
        let pool = RolePool::new(vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pool.pick(&mut rng), None);
    }

    #[test]
    fn test_pick_does_not_remove() {
        let pool = RolePool::new(vec![Role::Scp049]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pool.pick(&mut rng), Some(Role::Scp049));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_pick_reaches_every_entry() {
        let pool = RolePool::new(vec![Role::Scp049, Role::Scp096, Role::Scp106]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pool.pick(&mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3, "last entry must be reachable too");
    }

    #[test]
    fn test_remove_one_removes_single_occurrence() {
        let mut pool = RolePool::new(vec![Role::Scp173, Role::Scp173, Role::Scp049]);
        assert!(pool.remove_one(Role::Scp173));
        assert_eq!(pool.roles(), &[Role::Scp173, Role::Scp049]);
        assert!(!pool.remove_one(Role::Scp096));
    }

    #[test]
    fn test_remove_all() {
        let mut pool = RolePool::new(vec![Role::Scp173, Role::Scp049, Role::Scp173]);
        assert_eq!(pool.remove_all(Role::Scp173), 2);
        assert_eq!(pool.roles(), &[Role::Scp049]);
    }

    #[test]
    fn test_reset_refills_from_roster() {
        let mut pool = RolePool::new(vec![Role::Scp049, Role::Scp096]);
        pool.clear();
        assert!(pool.is_empty());
        pool.reset();
        assert_eq!(pool.roles(), &[Role::Scp049, Role::Scp096]);
    }

    #[test]
    fn test_new_roster_applies_on_reset_only() {
        let mut pool = RolePool::new(vec![Role::Scp049]);
        pool.set_roster(vec![Role::Scp106]);
        assert!(pool.contains(Role::Scp049));
        pool.reset();
        assert_eq!(pool.roles(), &[Role::Scp106]);
    }
}
