//! Note reconciliation: create, replace, or leave the roulette note.
//!
//! The note doubles as the run's only persistent state. An unchecked opt-in
//! box means the selection was already announced; a box ticked by a human
//! asks for a re-roll that overwrites the note.
//!
//! Deciding ([`plan_note_action`]) is pure; writing ([`apply_note_action`])
//! goes through a [`NotePlatform`].

use crate::error::AppError;
use crate::models::Note;
use crate::services::message::{has_opt_in, is_opt_in_checked};
use async_trait::async_trait;

/// Note operations on the code review platform.
#[async_trait]
pub trait NotePlatform {
    /// List notes on the merge request, oldest first.
    async fn list_notes(&self) -> Result<Vec<Note>, AppError>;

    /// Create a note with `body`.
    async fn create_note(&self, body: &str) -> Result<Note, AppError>;

    /// Replace the body of note `note_id`.
    async fn update_note(&self, note_id: i64, body: &str) -> Result<Note, AppError>;
}

/// What is already on the merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    NoPriorNote,
    PriorNoteUnchecked { note_id: i64 },
    PriorNoteChecked { note_id: i64 },
}

/// The single write (or non-write) a run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    Create { body: String },
    Replace { note_id: i64, body: String },
    Leave { note_id: i64 },
}

impl NoteAction {
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Leave { .. })
    }
}

/// Find the earliest roulette note written by `bot_username`.
///
/// Other notes by the same account are ignored.
pub fn find_prior_note<'a>(notes: &'a [Note], bot_username: &str) -> Option<&'a Note> {
    notes
        .iter()
        .find(|n| !n.system && n.is_authored_by(bot_username) && has_opt_in(&n.body))
}

/// Classify the merge request's notes.
pub fn determine_state(notes: &[Note], bot_username: &str) -> NoteState {
    match find_prior_note(notes, bot_username) {
        None => NoteState::NoPriorNote,
        Some(note) if is_opt_in_checked(&note.body) => {
            NoteState::PriorNoteChecked { note_id: note.id }
        }
        Some(note) => NoteState::PriorNoteUnchecked { note_id: note.id },
    }
}

/// Decide the action for `state`, given the freshly rendered `body`.
pub fn plan_note_action(state: NoteState, body: String) -> NoteAction {
    match state {
        NoteState::NoPriorNote => NoteAction::Create { body },
        NoteState::PriorNoteChecked { note_id } => NoteAction::Replace { note_id, body },
        NoteState::PriorNoteUnchecked { note_id } => NoteAction::Leave { note_id },
    }
}

/// Perform the write for `action`. Returns the written note, if any.
pub async fn apply_note_action<P>(
    platform: &P,
    action: &NoteAction,
) -> Result<Option<Note>, AppError>
where
    P: NotePlatform + ?Sized,
{
    match action {
        NoteAction::Create { body } => {
            log::info!("Creating new note...");
            let note = platform.create_note(body).await?;
            log::info!("Created new note id = {}", note.id);
            Ok(Some(note))
        }
        NoteAction::Replace { note_id, body } => {
            log::info!("Replacing note {}...", note_id);
            let note = platform.update_note(*note_id, body).await?;
            log::info!("Replaced note id = {}", note.id);
            Ok(Some(note))
        }
        NoteAction::Leave { note_id } => {
            log::info!(
                "Previous note exists (ID: {}) and retry wasn't ticked. Doing nothing.",
                note_id
            );
            Ok(None)
        }
    }
}
