//! Data models for a roulette run.
//!
//! These cover the reviewer roster, the Slack-derived availability directory,
//! GitLab notes and the final selection.

pub mod availability;
pub mod note;
pub mod reviewer;
pub mod selection;

// Re-exports for convenient access
pub use availability::{AvailabilityDirectory, AvailabilityStatus, UNAVAILABLE_STATUS_EMOJIS};
pub use note::{Note, NoteAuthor};
pub use reviewer::{Reviewer, Role, Roster};
pub use selection::SelectionResult;
