//! Reviewer selection result.

use crate::models::Reviewer;

/// The two reviewers picked for a merge request.
///
/// `maintainer` always carries the maintainer role and `developer` is never
/// the same person; the selector enforces both before constructing this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    /// Senior slot, drawn from maintainers.
    pub maintainer: Reviewer,
    /// Second slot, drawn from everyone eligible except `maintainer`.
    pub developer: Reviewer,
}
