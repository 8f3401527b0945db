//! Entry points invoked by the binary.

pub mod roulette;

pub use roulette::{choose_reviewers, reconcile_note, run_roulette, run_roulette_with, RunOutcome};
