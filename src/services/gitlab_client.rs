//! GitLab API client.
//!
//! Provides the HTTP client for the GitLab API v4 note endpoints used by the
//! roulette: list (with pagination), create and update.

use crate::error::AppError;
use crate::models::Note;
use crate::services::note_reconciler::NotePlatform;
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// GitLab API client configuration.
#[derive(Debug, Clone)]
pub struct GitLabClientConfig {
    /// Base URL of the GitLab instance (e.g., `https://gitlab.com`).
    pub base_url: String,

    /// Personal access token for authentication.
    pub token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitLabClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// GitLab API client.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    client: Client,
    config: GitLabClientConfig,
}

/// Pagination information from GitLab API response headers.
#[derive(Debug, Clone, Default)]
pub struct PaginationInfo {
    /// Next page number (if any).
    pub next_page: Option<u32>,
}

/// Query parameters for listing notes.
#[derive(Debug, Clone, Serialize)]
pub struct NotesQuery {
    /// `asc` or `desc`.
    pub sort: String,

    /// `created_at` or `updated_at`.
    pub order_by: String,
}

impl Default for NotesQuery {
    fn default() -> Self {
        Self {
            sort: "asc".to_string(),
            order_by: "created_at".to_string(),
        }
    }
}

impl GitLabClient {
    /// Create a new GitLab client.
    pub fn new(config: GitLabClientConfig) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();

        // Add the private token header for authentication
        let token_value = header::HeaderValue::from_str(&config.token)
            .map_err(|_| AppError::authentication("Invalid token format"))?;
        headers.insert("PRIVATE-TOKEN", token_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the base URL for API requests.
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/v4{}",
            self.config.base_url.trim_end_matches('/'),
            path
        )
    }

    /// Endpoint path for the notes of a merge request.
    ///
    /// `project` may be a numeric ID or a `group/project` path.
    fn notes_endpoint(project: &str, mr_iid: i64) -> String {
        format!(
            "/projects/{}/merge_requests/{}/notes",
            urlencoding::encode(project),
            mr_iid
        )
    }

    /// Parse pagination headers from response.
    fn parse_pagination(response: &Response) -> PaginationInfo {
        let headers = response.headers();

        let get_header = |name: &str| -> Option<u32> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
        };

        PaginationInfo {
            next_page: get_header("x-next-page"),
        }
    }

    /// Likely cause of a 404, depending on whether a single note was addressed.
    fn not_found_hint(endpoint: &str) -> &'static str {
        if endpoint.ends_with("/notes") {
            "Project or merge request not found. Check CI_PROJECT_ID and CI_MERGE_REQUEST_IID."
        } else {
            "Note not found. It was probably deleted after the notes were listed."
        }
    }

    /// Map a non-success status to an error, logging why it likely happened.
    async fn error_for_status(response: Response, endpoint: &str) -> AppError {
        let status = response.status();
        let status_code = status.as_u16();
        log::error!(
            "GitLab API error: {} {}",
            status_code,
            status.canonical_reason().unwrap_or("")
        );

        match status {
            StatusCode::UNAUTHORIZED => {
                log::error!("Authentication failed. Check PROJECT_REVIEWER_BOT_PAT token.");
                AppError::authentication("GitLab rejected the bot token")
            }
            StatusCode::FORBIDDEN => {
                log::error!(
                    "Permission denied. Bot needs Developer/Maintainer access to this project."
                );
                AppError::permission_denied(format!("No access to {}", endpoint))
            }
            StatusCode::NOT_FOUND => {
                log::error!("{} ({})", Self::not_found_hint(endpoint), endpoint);
                AppError::not_found(endpoint)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                let body_message = serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| {
                        // GitLab returns errors as {"message": "..."} or {"error": "..."}
                        v.get("message").or_else(|| v.get("error")).map(|m| match m.as_str() {
                            Some(s) => s.to_string(),
                            // Sometimes "message" is an object like {"base":["msg"]}
                            None => m.to_string(),
                        })
                    });

                let message = match (status, body_message) {
                    (StatusCode::TOO_MANY_REQUESTS, _) => "Rate limit exceeded".to_string(),
                    (_, Some(msg)) => msg,
                    _ => format!("Request failed ({}): {}", status_code, body),
                };
                AppError::gitlab_api_full(message, status_code, endpoint)
            }
        }
    }

    /// Handle API response errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, AppError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::unexpected_response(e.to_string(), endpoint))
        } else {
            Err(Self::error_for_status(response, endpoint).await)
        }
    }

    /// Fetch all pages of a list endpoint.
    ///
    /// Each page must be a JSON array; anything else is a contract violation.
    pub async fn get_all_pages<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Option<&impl Serialize>,
    ) -> Result<Vec<T>, AppError> {
        let mut all_data = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self.api_url(endpoint);
            let mut request = self.client.get(&url);

            if let Some(q) = query {
                request = request.query(q);
            }
            request = request.query(&[("page", page.to_string()), ("per_page", "100".to_string())]);

            let response = request.send().await?;
            let pagination = Self::parse_pagination(&response);
            let payload: serde_json::Value = self.handle_response(response, endpoint).await?;

            if !payload.is_array() {
                log::error!("GitLab API returned unexpected response: {}", payload);
                return Err(AppError::unexpected_response(
                    "expected an array",
                    endpoint,
                ));
            }
            let data: Vec<T> = serde_json::from_value(payload)
                .map_err(|e| AppError::unexpected_response(e.to_string(), endpoint))?;
            all_data.extend(data);

            match pagination.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(all_data)
    }

    /// List all notes on a merge request, oldest first.
    pub async fn list_notes(&self, project: &str, mr_iid: i64) -> Result<Vec<Note>, AppError> {
        let endpoint = Self::notes_endpoint(project, mr_iid);
        self.get_all_pages(&endpoint, Some(&NotesQuery::default()))
            .await
    }

    /// Add a general comment to a merge request.
    pub async fn create_note(
        &self,
        project: &str,
        mr_iid: i64,
        body: &str,
    ) -> Result<Note, AppError> {
        let endpoint = Self::notes_endpoint(project, mr_iid);
        let url = self.api_url(&endpoint);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;

        self.handle_response(response, &endpoint).await
    }

    /// Replace the body of an existing note.
    pub async fn update_note(
        &self,
        project: &str,
        mr_iid: i64,
        note_id: i64,
        body: &str,
    ) -> Result<Note, AppError> {
        let endpoint = format!("{}/{}", Self::notes_endpoint(project, mr_iid), note_id);
        let url = self.api_url(&endpoint);

        let response = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;

        self.handle_response(response, &endpoint).await
    }

    /// Scope this client to the notes of one merge request.
    pub fn merge_request_notes(
        &self,
        project: impl Into<String>,
        mr_iid: i64,
    ) -> MergeRequestNotes<'_> {
        MergeRequestNotes {
            client: self,
            project: project.into(),
            mr_iid,
        }
    }
}

/// Notes of a single merge request.
#[derive(Debug, Clone)]
pub struct MergeRequestNotes<'a> {
    client: &'a GitLabClient,
    project: String,
    mr_iid: i64,
}

#[async_trait]
impl<'a> NotePlatform for MergeRequestNotes<'a> {
    async fn list_notes(&self) -> Result<Vec<Note>, AppError> {
        self.client.list_notes(&self.project, self.mr_iid).await
    }

    async fn create_note(&self, body: &str) -> Result<Note, AppError> {
        self.client.create_note(&self.project, self.mr_iid, body).await
    }

    async fn update_note(&self, note_id: i64, body: &str) -> Result<Note, AppError> {
        self.client
            .update_note(&self.project, self.mr_iid, note_id, body)
            .await
    }
}
