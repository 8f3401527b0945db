//! Reviewer roster model.
//!
//! The roster is a JSON document of the form:
//!
//! ```json
//! {
//!   "reviewers": [
//!     {
//!       "name": "Ada",
//!       "email": "ada@example.com",
//!       "userId": 1,
//!       "slackUserId": "U01",
//!       "selectionChance": 50,
//!       "roles": ["maintainer", "contributor"]
//!     }
//!   ]
//! }
//! ```

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Role tag carried by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Privileged role: eligible for the senior reviewer slot.
    #[serde(alias = "privileged")]
    Maintainer,
    /// General role.
    #[serde(alias = "general")]
    Contributor,
}

impl Role {
    /// Name used in log lines and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintainer => "maintainer",
            Self::Contributor => "contributor",
        }
    }
}

/// A reviewer entry from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    pub name: String,
    pub email: String,

    /// GitLab user ID.
    pub user_id: i64,

    /// Slack member ID used for the availability lookup.
    pub slack_user_id: String,

    /// Percentage chance (0-100) of being included in a run's pool.
    /// `None` means always eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_chance: Option<u8>,

    pub roles: Vec<Role>,
}

impl Reviewer {
    /// Check if this reviewer carries the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check if this reviewer can fill the senior slot.
    pub fn is_maintainer(&self) -> bool {
        self.has_role(Role::Maintainer)
    }
}

/// The full list of candidate reviewers, loaded once per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub reviewers: Vec<Reviewer>,
}

impl Roster {
    /// Parse and validate a roster document.
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let roster: Roster = serde_json::from_str(raw)
            .map_err(|e| AppError::roster(format!("Invalid roster document: {}", e)))?;
        roster.validate()?;
        Ok(roster)
    }

    /// Read and validate the roster document at `path`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::roster(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), AppError> {
        for reviewer in &self.reviewers {
            if reviewer.roles.is_empty() {
                return Err(AppError::roster(format!(
                    "Reviewer {} ({}) has no roles",
                    reviewer.name, reviewer.user_id
                )));
            }
            if let Some(chance) = reviewer.selection_chance {
                if chance > 100 {
                    return Err(AppError::roster(format!(
                        "Reviewer {} has selectionChance {} (must be 0-100)",
                        reviewer.name, chance
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"{
        "reviewers": [
            {
                "name": "Ada",
                "email": "ada@example.com",
                "userId": 1,
                "slackUserId": "U01",
                "roles": ["maintainer", "contributor"]
            },
            {
                "name": "Brian",
                "email": "brian@example.com",
                "userId": 2,
                "slackUserId": "U02",
                "selectionChance": 25,
                "roles": ["general"]
            }
        ]
    }"#;

    #[test]
    fn test_parse_roster() {
        let roster = Roster::from_json_str(ROSTER).unwrap();
        assert_eq!(roster.reviewers.len(), 2);

        let ada = &roster.reviewers[0];
        assert_eq!(ada.user_id, 1);
        assert_eq!(ada.slack_user_id, "U01");
        assert_eq!(ada.selection_chance, None);
        assert!(ada.is_maintainer());

        let brian = &roster.reviewers[1];
        assert_eq!(brian.selection_chance, Some(25));
        assert_eq!(brian.roles, vec![Role::Contributor]);
        assert!(!brian.is_maintainer());
    }

    #[test]
    fn test_privileged_alias() {
        let role: Role = serde_json::from_str("\"privileged\"").unwrap();
        assert_eq!(role, Role::Maintainer);
    }

    #[test]
    fn test_rejects_empty_roles() {
        let raw = r#"{"reviewers":[{"name":"A","email":"a@x","userId":1,"slackUserId":"U1","roles":[]}]}"#;
        assert!(matches!(
            Roster::from_json_str(raw),
            Err(AppError::Roster { .. })
        ));
    }

    #[test]
    fn test_rejects_chance_over_100() {
        let raw = r#"{"reviewers":[{"name":"A","email":"a@x","userId":1,"slackUserId":"U1","selectionChance":101,"roles":["contributor"]}]}"#;
        assert!(Roster::from_json_str(raw).is_err());
    }

    #[test]
    fn test_rejects_unknown_role() {
        let raw = r#"{"reviewers":[{"name":"A","email":"a@x","userId":1,"slackUserId":"U1","roles":["owner"]}]}"#;
        assert!(Roster::from_json_str(raw).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Roster::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Roster { .. }));
    }
}
