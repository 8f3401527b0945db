//! Chance filter ("dice of fate").
//!
//! Each reviewer with a `selectionChance` survives an independent draw with
//! that probability. Reviewers without one are always kept.

use crate::models::{Reviewer, Role};
use crate::services::candidate_pool::CandidatePool;
use crate::services::random::RandomSource;

/// Run one inclusion draw for `reviewer`.
///
/// A chance of 0 never survives and 100 always does.
pub fn survives_draw(reviewer: &Reviewer, rng: &mut impl RandomSource) -> bool {
    let Some(chance) = reviewer.selection_chance else {
        return true;
    };
    if chance == 0 {
        return false;
    }

    let threshold = f64::from(chance) / 100.0;
    let roll = rng.next_unit();
    log::debug!(
        "Dice of fate for {}: rolled {:.4}, needs <= {:.2}",
        reviewer.name,
        roll,
        threshold
    );
    roll <= threshold
}

/// Thin the pool by chance, falling back to the unfiltered pool when the
/// result would leave no maintainer or no contributor.
pub fn apply_chance_filter(pool: &CandidatePool, rng: &mut impl RandomSource) -> CandidatePool {
    let filtered = pool.filter(|r| survives_draw(r, &mut *rng));

    let maintainers = filtered.with_role(Role::Maintainer);
    let contributors = filtered.with_role(Role::Contributor);

    if maintainers.is_empty() || contributors.is_empty() {
        log::warn!(
            "Disregarding dice of fate: {} maintainer(s) and {} contributor(s) left after draws",
            maintainers.len(),
            contributors.len()
        );
        return pool.clone();
    }

    log::info!(
        "Eligible reviewers after chance draws: {:?}",
        filtered.names()
    );
    filtered
}
