//! Merge request note model.
//!
//! The roulette note is the only durable state: the process itself keeps
//! nothing between runs.

use serde::{Deserialize, Serialize};

/// Author of a note as returned by GitLab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAuthor {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// GitLab note on a merge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub body: String,
    pub author: NoteAuthor,

    /// System-generated note (not user-authored).
    #[serde(default)]
    pub system: bool,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl Note {
    /// Check if this note was written by the given username.
    pub fn is_authored_by(&self, username: &str) -> bool {
        self.author.username == username
    }
}
