//! Reviewer Roulette - random reviewer selection for GitLab merge requests.
//!
//! Picks one maintainer and one other developer for a merge request, skipping
//! the author, anyone who loses their chance draw and anyone away on Slack,
//! then posts the pair as a note. The note's checkbox lets a human ask for a
//! re-roll on the next run.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{RouletteArgs, RouletteConfig};
pub use error::AppError;
