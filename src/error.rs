//! Application error types.
//!
//! Every failure in a roulette run is fatal: these errors bubble up to the
//! binary, which logs them and exits with a non-zero status.

use thiserror::Error;

/// Application-level errors returned by every fallible operation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed configuration input.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        field: Option<String>,
    },

    /// The reviewer roster document could not be read or is invalid.
    #[error("Roster error: {message}")]
    Roster { message: String },

    /// GitLab API request failed.
    #[error("GitLab API error: {message}")]
    GitLabApi {
        message: String,
        status_code: Option<u16>,
        endpoint: Option<String>,
    },

    /// Authentication failed or credentials invalid (401).
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// The token is valid but lacks access to the resource (403).
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// Requested resource not found (404).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Slack directory query failed.
    #[error("Slack API error: {message}")]
    Slack { message: String },

    /// Network request failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// An external API answered with a payload that breaks its contract.
    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { message: String, endpoint: String },

    /// No eligible reviewer is left for a selection slot.
    #[error("No eligible reviewers left in the {pool} pool")]
    EmptyPool { pool: String },

    /// Internal application error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a configuration error naming the offending field.
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a roster error.
    pub fn roster(message: impl Into<String>) -> Self {
        Self::Roster {
            message: message.into(),
        }
    }

    /// Create a GitLab API error.
    pub fn gitlab_api(message: impl Into<String>) -> Self {
        Self::GitLabApi {
            message: message.into(),
            status_code: None,
            endpoint: None,
        }
    }

    /// Create a GitLab API error with status code and endpoint.
    pub fn gitlab_api_full(
        message: impl Into<String>,
        status_code: u16,
        endpoint: impl Into<String>,
    ) -> Self {
        Self::GitLabApi {
            message: message.into(),
            status_code: Some(status_code),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a permission denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a Slack error.
    pub fn slack(message: impl Into<String>) -> Self {
        Self::Slack {
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an unexpected response error.
    pub fn unexpected_response(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an empty pool error.
    pub fn empty_pool(pool: impl Into<String>) -> Self {
        Self::EmptyPool { pool: pool.into() }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::GitLabApi { status_code, .. } => *status_code,
            Self::Authentication { .. } => Some(401),
            Self::PermissionDenied { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

// Conversions from common error types

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network("Failed to connect to server")
        } else if err.is_status() {
            Self::gitlab_api(format!("HTTP error: {}", err))
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(format!("I/O error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gitlab_api_error_full() {
        let err = AppError::gitlab_api_full("Not Found", 404, "/projects/1/merge_requests/2/notes");
        assert_eq!(err.status_code(), Some(404));
        match err {
            AppError::GitLabApi { endpoint, .. } => {
                assert_eq!(endpoint.as_deref(), Some("/projects/1/merge_requests/2/notes"))
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_classified_status_codes() {
        assert_eq!(AppError::authentication("x").status_code(), Some(401));
        assert_eq!(AppError::permission_denied("x").status_code(), Some(403));
        assert_eq!(AppError::not_found("x").status_code(), Some(404));
        assert_eq!(AppError::slack("x").status_code(), None);
    }

    #[test]
    fn test_config_field() {
        let err = AppError::config_field("not an integer", "GITLAB_USER_ID");
        match err {
            AppError::Config { field, .. } => assert_eq!(field.as_deref(), Some("GITLAB_USER_ID")),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_display_impl() {
        assert_eq!(
            format!("{}", AppError::authentication("invalid token")),
            "Authentication error: invalid token"
        );
        assert_eq!(
            format!("{}", AppError::empty_pool("maintainer")),
            "No eligible reviewers left in the maintainer pool"
        );
    }
}
