//! Reviewer availability model derived from Slack status markers.

use std::collections::HashMap;

/// Slack status emojis that mark someone as away (holiday or sick).
pub const UNAVAILABLE_STATUS_EMOJIS: &[&str] =
    &[":palm_tree:", ":holiday:", ":face_with_thermometer:"];

/// Whether a reviewer can currently take a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
}

impl AvailabilityStatus {
    /// Derive availability from an optional Slack status emoji.
    pub fn from_status_emoji(emoji: Option<&str>) -> Self {
        match emoji {
            Some(e) if UNAVAILABLE_STATUS_EMOJIS.contains(&e.trim()) => Self::Unavailable,
            _ => Self::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Availability per Slack member ID.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityDirectory {
    statuses: HashMap<String, AvailabilityStatus>,
}

impl AvailabilityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status for a member, replacing any earlier entry.
    pub fn insert(&mut self, slack_user_id: impl Into<String>, status: AvailabilityStatus) {
        self.statuses.insert(slack_user_id.into(), status);
    }

    /// Look up a member. Unknown members are treated as available.
    pub fn status_of(&self, slack_user_id: &str) -> AvailabilityStatus {
        self.statuses
            .get(slack_user_id)
            .copied()
            .unwrap_or(AvailabilityStatus::Available)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AvailabilityStatus)> for AvailabilityDirectory {
    fn from_iter<I: IntoIterator<Item = (S, AvailabilityStatus)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (id, status) in iter {
            directory.insert(id, status);
        }
        directory
    }
}
