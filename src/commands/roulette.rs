//! The roulette run: select two reviewers and reconcile the note.
//!
//! Stages run strictly in sequence: roster and availability, author
//! exclusion, chance draws, availability filter, selection, then the note.
//! Any failure aborts the run before a write happens.

use crate::config::RouletteConfig;
use crate::error::AppError;
use crate::models::{AvailabilityDirectory, Note, Roster, SelectionResult};
use crate::services::message::format_note_body;
use crate::services::note_reconciler::{
    apply_note_action, determine_state, plan_note_action, NoteAction, NotePlatform, NoteState,
};
use crate::services::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::services::{
    apply_availability_filter, apply_chance_filter, select_reviewers, CandidatePool, GitLabClient,
    SlackClient,
};

/// What a run decided and did.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub selection: SelectionResult,
    pub state: NoteState,
    pub action: NoteAction,
    /// The note returned by the platform after a write. `None` for a no-op
    /// or a dry run.
    pub written: Option<Note>,
}

/// Run the selection pipeline over an already loaded roster and directory.
pub fn choose_reviewers(
    roster: &Roster,
    author_id: i64,
    directory: &AvailabilityDirectory,
    rng: &mut impl RandomSource,
) -> Result<SelectionResult, AppError> {
    let pool = CandidatePool::without_author(roster, author_id);
    let pool = apply_chance_filter(&pool, rng);
    let pool = apply_availability_filter(&pool, directory);
    select_reviewers(&pool, rng)
}

/// Compare the selection against the merge request's notes and write the
/// resulting create or replace, unless `dry_run` is set.
pub async fn reconcile_note<P>(
    platform: &P,
    bot_username: &str,
    selection: &SelectionResult,
    job_url: Option<&str>,
    dry_run: bool,
) -> Result<(NoteState, NoteAction, Option<Note>), AppError>
where
    P: NotePlatform + ?Sized,
{
    let notes = platform.list_notes().await?;
    let state = determine_state(&notes, bot_username);
    log::info!("Existing roulette note state: {:?}", state);

    let action = plan_note_action(state, format_note_body(selection, job_url));

    if dry_run && action.is_write() {
        log::info!("Dry run: would {}", action_summary(&action));
        return Ok((state, action, None));
    }

    let written = apply_note_action(platform, &action).await?;
    Ok((state, action, written))
}

fn action_summary(action: &NoteAction) -> String {
    match action {
        NoteAction::Create { .. } => "create new note".to_string(),
        NoteAction::Replace { note_id, .. } => format!("replace note {}", note_id),
        NoteAction::Leave { note_id } => format!("leave note {} untouched", note_id),
    }
}

/// Full run against Slack and GitLab with an explicit random source.
pub async fn run_roulette_with(
    config: &RouletteConfig,
    rng: &mut impl RandomSource,
) -> Result<RunOutcome, AppError> {
    let roster = Roster::load(&config.roster_path)?;
    log::info!(
        "Loaded {} reviewers from {}",
        roster.reviewers.len(),
        config.roster_path.display()
    );

    let slack = SlackClient::new(config.slack.clone())?;
    let gitlab = GitLabClient::new(config.gitlab.clone())?;

    let directory = slack.availability_directory().await?;
    let selection = choose_reviewers(&roster, config.author_id, &directory, rng)?;

    let notes = gitlab.merge_request_notes(config.project_id.clone(), config.merge_request_iid);
    let (state, action, written) = reconcile_note(
        &notes,
        &config.bot_username,
        &selection,
        config.job_url.as_deref(),
        config.dry_run,
    )
    .await?;

    Ok(RunOutcome {
        selection,
        state,
        action,
        written,
    })
}

/// Full run, seeding the generator when the configuration asks for it.
pub async fn run_roulette(config: &RouletteConfig) -> Result<RunOutcome, AppError> {
    match config.seed {
        Some(seed) => {
            log::info!("Using seeded draw (seed {})", seed);
            run_roulette_with(config, &mut SeededRandom::seeded(seed)).await
        }
        None => run_roulette_with(config, &mut ThreadRandom::thread()).await,
    }
}
