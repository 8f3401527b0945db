//! Reviewer selector: one maintainer plus one other eligible reviewer.

use crate::error::AppError;
use crate::models::{Reviewer, Role, SelectionResult};
use crate::services::candidate_pool::CandidatePool;
use crate::services::random::RandomSource;

/// Draw a reviewer uniformly from `pool`, failing when it is empty.
fn draw(
    pool: &CandidatePool,
    pool_name: &str,
    rng: &mut impl RandomSource,
) -> Result<Reviewer, AppError> {
    if pool.is_empty() {
        return Err(AppError::empty_pool(pool_name));
    }
    let index = rng.pick_index(pool.len());
    pool.get(index)
        .cloned()
        .ok_or_else(|| AppError::internal(format!("Draw index {} out of bounds", index)))
}

/// Pick the maintainer slot, then the second slot from everyone else.
///
/// The second reviewer may also be a maintainer. An empty pool for either
/// slot is an error; there is no fallback at this stage.
pub fn select_reviewers(
    pool: &CandidatePool,
    rng: &mut impl RandomSource,
) -> Result<SelectionResult, AppError> {
    let maintainers = pool.with_role(Role::Maintainer);
    let maintainer = draw(&maintainers, "maintainer", rng)?;

    let others = pool.excluding(maintainer.user_id);
    let developer = draw(&others, "all developers", rng)?;

    log::info!(
        "Selected maintainer {} ({}) and developer {} ({})",
        maintainer.name,
        maintainer.user_id,
        developer.name,
        developer.user_id
    );

    Ok(SelectionResult {
        maintainer,
        developer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::candidate_pool::tests::reviewer;
    use crate::services::random::{FixedSequence, SeededRandom};

    #[test]
    fn test_selects_distinct_reviewers() {
        let pool = CandidatePool::from_reviewers(vec![
            reviewer(1, &[Role::Maintainer], None),
            reviewer(2, &[Role::Maintainer, Role::Contributor], None),
            reviewer(3, &[Role::Contributor], None),
            reviewer(4, &[Role::Contributor], None),
        ]);
        let mut rng = SeededRandom::seeded(1);
        for _ in 0..500 {
            let result = select_reviewers(&pool, &mut rng).unwrap();
            assert!(result.maintainer.is_maintainer());
            assert_ne!(result.maintainer.user_id, result.developer.user_id);
        }
    }

    #[test]
    fn test_second_slot_may_be_maintainer() {
        let pool = CandidatePool::from_reviewers(vec![
            reviewer(1, &[Role::Maintainer], None),
            reviewer(2, &[Role::Maintainer], None),
        ]);
        let result = select_reviewers(&pool, &mut FixedSequence::new(vec![], vec![0, 0])).unwrap();
        assert_eq!(result.maintainer.user_id, 1);
        assert_eq!(result.developer.user_id, 2);
    }

    #[test]
    fn test_no_maintainer_is_error() {
        let pool = CandidatePool::from_reviewers(vec![reviewer(3, &[Role::Contributor], None)]);
        let err = select_reviewers(&pool, &mut FixedSequence::default()).unwrap_err();
        assert!(matches!(err, AppError::EmptyPool { ref pool } if pool == "maintainer"));
    }

    #[test]
    fn test_lone_maintainer_is_error() {
        let pool = CandidatePool::from_reviewers(vec![reviewer(
            1,
            &[Role::Maintainer, Role::Contributor],
            None,
        )]);
        let err = select_reviewers(&pool, &mut FixedSequence::default()).unwrap_err();
        assert!(matches!(err, AppError::EmptyPool { .. }));
    }

    #[test]
    fn test_empty_pool_is_error() {
        assert!(select_reviewers(&CandidatePool::default(), &mut FixedSequence::default()).is_err());
    }
}
