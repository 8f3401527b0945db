//! Removes reviewers whose Slack status says they are away.

use crate::models::AvailabilityDirectory;
use crate::services::candidate_pool::CandidatePool;

/// Drop reviewers marked unavailable. Members missing from the directory stay.
pub fn apply_availability_filter(
    pool: &CandidatePool,
    directory: &AvailabilityDirectory,
) -> CandidatePool {
    let available = pool.filter(|r| {
        let status = directory.status_of(&r.slack_user_id);
        if !status.is_available() {
            log::info!("Skipping {}: away according to Slack status", r.name);
        }
        status.is_available()
    });

    log::info!(
        "Eligible reviewers after removing holiday/sick: {:?}",
        available.names()
    );
    available
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityStatus, Role};
    use crate::services::candidate_pool::tests::reviewer;

    #[test]
    fn test_removes_unavailable() {
        let pool = CandidatePool::from_reviewers(vec![
            reviewer(1, &[Role::Maintainer], None),
            reviewer(2, &[Role::Contributor], None),
        ]);
        let directory: AvailabilityDirectory = [
            ("U01", AvailabilityStatus::Available),
            ("U02", AvailabilityStatus::Unavailable),
        ]
        .into_iter()
        .collect();

        let available = apply_availability_filter(&pool, &directory);
        assert!(available.contains(1));
        assert!(!available.contains(2));
    }

    #[test]
    fn test_keeps_reviewers_without_record() {
        let pool = CandidatePool::from_reviewers(vec![reviewer(3, &[Role::Contributor], None)]);
        let available = apply_availability_filter(&pool, &AvailabilityDirectory::new());
        assert_eq!(available, pool);
    }
}
