//! Slack Web API client for reviewer availability.
//!
//! Reads every workspace member via `users.list` and turns their status
//! emoji into an [`AvailabilityDirectory`].

use crate::error::AppError;
use crate::models::{AvailabilityDirectory, AvailabilityStatus};
use reqwest::{header, Client};
use serde::Deserialize;

/// Default Slack Web API base URL.
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Slack client configuration.
#[derive(Debug, Clone)]
pub struct SlackClientConfig {
    /// Base URL of the Web API (overridable for tests).
    pub base_url: String,

    /// Bot token (`xoxb-...`).
    pub token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SlackClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SLACK_API_URL.to_string(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Slack member profile fields we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackProfile {
    #[serde(default)]
    pub status_emoji: Option<String>,
}

/// Slack workspace member from `users.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackMember {
    pub id: String,
    #[serde(default)]
    pub profile: Option<SlackProfile>,
}

impl SlackMember {
    pub fn availability(&self) -> AvailabilityStatus {
        AvailabilityStatus::from_status_emoji(
            self.profile
                .as_ref()
                .and_then(|p| p.status_emoji.as_deref()),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsersListResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    members: Vec<SlackMember>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

/// Slack Web API client.
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: Client,
    config: SlackClientConfig,
}

impl SlackClient {
    /// Create a new Slack client.
    pub fn new(config: SlackClientConfig) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| {
                AppError::config_field("Invalid Slack token format", "REVIEWER_BOT_SLACK_TOKEN")
            })?;
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), method)
    }

    /// Fetch every member, following cursor pagination.
    pub async fn list_members(&self) -> Result<Vec<SlackMember>, AppError> {
        let url = self.api_url("users.list");
        let mut members = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self.client.get(&url).query(&[("limit", "200")]);
            if let Some(c) = &cursor {
                request = request.query(&[("cursor", c.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::slack(format!(
                    "users.list failed with HTTP {}",
                    status.as_u16()
                )));
            }

            let page: UsersListResponse = response
                .json()
                .await
                .map_err(|e| AppError::unexpected_response(e.to_string(), "users.list"))?;
            if !page.ok {
                return Err(AppError::slack(format!(
                    "users.list returned error: {}",
                    page.error.as_deref().unwrap_or("unknown")
                )));
            }
            members.extend(page.members);

            let next = page
                .response_metadata
                .and_then(|m| m.next_cursor)
                .filter(|c| !c.is_empty());
            match next {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    log::warn!("users.list repeated cursor {}, stopping pagination", next);
                    break;
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        log::debug!("Fetched {} Slack members", members.len());
        Ok(members)
    }

    /// Build the availability directory for the whole workspace.
    pub async fn availability_directory(&self) -> Result<AvailabilityDirectory, AppError> {
        let members = self.list_members().await?;
        Ok(members
            .iter()
            .map(|m| (m.id.clone(), m.availability()))
            .collect())
    }
}
