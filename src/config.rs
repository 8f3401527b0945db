//! Run configuration.
//!
//! Every option can be given as a flag or through the variables GitLab CI
//! already exports. [`RouletteConfig`] is validated once at startup and then
//! passed explicitly to every stage.

use crate::error::AppError;
use crate::services::gitlab_client::GitLabClientConfig;
use crate::services::slack_client::{SlackClientConfig, DEFAULT_SLACK_API_URL};
use clap::Parser;
use std::path::PathBuf;

/// Pick two reviewers for a merge request and announce them in a note.
#[derive(Parser, Debug, Clone)]
#[command(name = "reviewer-roulette")]
#[command(version, about, long_about = None)]
pub struct RouletteArgs {
    /// Path to the reviewer roster JSON document
    #[arg(long, env = "REVIEWER_CONFIG")]
    pub roster: PathBuf,

    /// GitLab username the bot posts notes as
    #[arg(long, env = "REVIEWER_BOT_USERNAME")]
    pub bot_username: String,

    /// Slack bot token used to read member statuses
    #[arg(long, env = "REVIEWER_BOT_SLACK_TOKEN", hide_env_values = true)]
    pub slack_token: String,

    /// GitLab personal access token of the bot
    #[arg(long, env = "PROJECT_REVIEWER_BOT_PAT", hide_env_values = true)]
    pub gitlab_token: String,

    /// GitLab base URL (without /api/v4)
    #[arg(long, env = "GITLAB_API_URL")]
    pub gitlab_url: String,

    /// Project ID or full path
    #[arg(long, env = "CI_PROJECT_ID")]
    pub project_id: String,

    /// Merge request IID
    #[arg(long, env = "CI_MERGE_REQUEST_IID")]
    pub merge_request_iid: String,

    /// GitLab user ID of the merge request author
    #[arg(long, env = "GITLAB_USER_ID")]
    pub author_id: String,

    /// URL of the CI job, linked from the note
    #[arg(long, env = "CI_JOB_URL")]
    pub job_url: Option<String>,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_URL", default_value = DEFAULT_SLACK_API_URL)]
    pub slack_api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "REVIEWER_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Seed for a reproducible draw
    #[arg(long, env = "REVIEWER_ROULETTE_SEED")]
    pub seed: Option<u64>,

    /// Decide what to write but do not write it
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct RouletteConfig {
    pub roster_path: PathBuf,
    pub bot_username: String,
    pub gitlab: GitLabClientConfig,
    pub slack: SlackClientConfig,
    pub project_id: String,
    pub merge_request_iid: i64,
    pub author_id: i64,
    pub job_url: Option<String>,
    pub seed: Option<u64>,
    pub dry_run: bool,
}

/// Parse an integer option, naming the option on failure.
pub fn parse_integer(value: &str, field: &str) -> Result<i64, AppError> {
    value.trim().parse::<i64>().map_err(|_| {
        AppError::config_field(format!("{} must be an integer, got {:?}", field, value), field)
    })
}

fn require(value: String, field: &str) -> Result<String, AppError> {
    if value.trim().is_empty() {
        Err(AppError::config_field(format!("{} must not be empty", field), field))
    } else {
        Ok(value)
    }
}

impl RouletteConfig {
    /// Validate parsed arguments.
    pub fn from_args(args: RouletteArgs) -> Result<Self, AppError> {
        let author_id = parse_integer(&args.author_id, "GITLAB_USER_ID")?;
        let merge_request_iid = parse_integer(&args.merge_request_iid, "CI_MERGE_REQUEST_IID")?;

        Ok(Self {
            roster_path: args.roster,
            bot_username: require(args.bot_username, "REVIEWER_BOT_USERNAME")?,
            gitlab: GitLabClientConfig {
                base_url: require(args.gitlab_url, "GITLAB_API_URL")?,
                token: require(args.gitlab_token, "PROJECT_REVIEWER_BOT_PAT")?,
                timeout_secs: args.timeout_secs,
            },
            slack: SlackClientConfig {
                base_url: require(args.slack_api_url, "SLACK_API_URL")?,
                token: require(args.slack_token, "REVIEWER_BOT_SLACK_TOKEN")?,
                timeout_secs: args.timeout_secs,
            },
            project_id: require(args.project_id, "CI_PROJECT_ID")?,
            merge_request_iid,
            author_id,
            job_url: args.job_url.filter(|url| !url.trim().is_empty()),
            seed: args.seed,
            dry_run: args.dry_run,
        })
    }
}
