//! Business logic services.
//!
//! Selection stages (candidate pool, chance filter, availability filter,
//! selector), note formatting and reconciliation, and the GitLab and Slack
//! clients.
//!
//! Selection and reconciliation take their randomness and platform access as
//! arguments so they can be tested without network or global state.

pub mod availability_filter;
pub mod candidate_pool;
pub mod chance_filter;
pub mod gitlab_client;
pub mod message;
pub mod note_reconciler;
pub mod random;
pub mod selector;
pub mod slack_client;

pub use availability_filter::apply_availability_filter;
pub use candidate_pool::CandidatePool;
pub use chance_filter::apply_chance_filter;
pub use gitlab_client::{GitLabClient, GitLabClientConfig};
pub use note_reconciler::{NoteAction, NotePlatform, NoteState};
pub use random::{FixedSequence, RandomSource, RngSource, SeededRandom, ThreadRandom};
pub use selector::select_reviewers;
pub use slack_client::{SlackClient, SlackClientConfig};
