//! Candidate pool of eligible reviewers.
//!
//! Each filtering stage produces a new pool; a pool is never mutated in place.

use crate::models::{Reviewer, Role, Roster};
use std::collections::HashSet;

/// Ordered, deduplicated set of reviewers still eligible for selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    reviewers: Vec<Reviewer>,
}

impl CandidatePool {
    /// Build a pool from the roster minus the merge request author.
    ///
    /// Duplicate user IDs keep their first entry.
    pub fn without_author(roster: &Roster, author_id: i64) -> Self {
        let pool = Self::from_reviewers(
            roster
                .reviewers
                .iter()
                .filter(|r| r.user_id != author_id)
                .cloned(),
        );
        log::info!(
            "Eligible reviewers after removing author {}: {:?}",
            author_id,
            pool.names()
        );
        pool
    }

    pub fn from_reviewers(reviewers: impl IntoIterator<Item = Reviewer>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for reviewer in reviewers {
            if seen.insert(reviewer.user_id) {
                unique.push(reviewer);
            } else {
                log::warn!(
                    "Ignoring duplicate roster entry for user {} ({})",
                    reviewer.user_id,
                    reviewer.name
                );
            }
        }
        Self { reviewers: unique }
    }

    /// New pool holding only the reviewers matching `predicate`.
    pub fn filter(&self, mut predicate: impl FnMut(&Reviewer) -> bool) -> Self {
        Self {
            reviewers: self
                .reviewers
                .iter()
                .filter(|&r| predicate(r))
                .cloned()
                .collect(),
        }
    }

    /// New pool holding the reviewers tagged with `role`.
    pub fn with_role(&self, role: Role) -> Self {
        self.filter(|r| r.has_role(role))
    }

    /// New pool without the reviewer whose user ID is `user_id`.
    pub fn excluding(&self, user_id: i64) -> Self {
        self.filter(|r| r.user_id != user_id)
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.reviewers.iter().any(|r| r.user_id == user_id)
    }

    pub fn reviewers(&self) -> &[Reviewer] {
        &self.reviewers
    }

    pub fn get(&self, index: usize) -> Option<&Reviewer> {
        self.reviewers.get(index)
    }

    pub fn names(&self) -> Vec<&str> {
        self.reviewers.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn reviewer(id: i64, roles: &[Role], chance: Option<u8>) -> Reviewer {
        Reviewer {
            name: format!("Reviewer {}", id),
            email: format!("reviewer{}@example.com", id),
            user_id: id,
            slack_user_id: format!("U{:02}", id),
            selection_chance: chance,
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn test_author_never_in_pool() {
        let roster = Roster {
            reviewers: (1..=5)
                .map(|id| reviewer(id, &[Role::Contributor], None))
                .collect(),
        };
        for author in 1..=5 {
            let pool = CandidatePool::without_author(&roster, author);
            assert_eq!(pool.len(), 4);
            assert!(!pool.contains(author));
        }
    }

    #[test]
    fn test_unknown_author_keeps_everyone() {
        let roster = Roster {
            reviewers: vec![reviewer(1, &[Role::Maintainer], None)],
        };
        assert_eq!(CandidatePool::without_author(&roster, 99).len(), 1);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let mut second = reviewer(1, &[Role::Contributor], None);
        second.name = "Impostor".to_string();
        let pool =
            CandidatePool::from_reviewers(vec![reviewer(1, &[Role::Maintainer], None), second]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.reviewers()[0].name, "Reviewer 1");
    }

    #[test]
    fn test_role_and_exclusion_views() {
        let pool = CandidatePool::from_reviewers(vec![
            reviewer(1, &[Role::Maintainer, Role::Contributor], None),
            reviewer(2, &[Role::Contributor], None),
        ]);
        assert_eq!(pool.with_role(Role::Maintainer).len(), 1);
        assert_eq!(pool.with_role(Role::Contributor).len(), 2);
        assert!(!pool.excluding(1).contains(1));
        // The source pool is untouched.
        assert_eq!(pool.len(), 2);
    }
}
