//! Error types for GitHub API operations.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::http::{HttpError, HttpResponse};
use crate::presenter::PresenterError;

/// Name of the API used in user-facing rate limit messages.
pub const API_NAME: &str = "GitHub";

/// Fallback wait when a rate limited response carries no reset hint.
const DEFAULT_RESET_SECS: i64 = 60;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GitHubError {
    /// Convert into the error a presenter records, naming the failed
    /// operation.
    pub fn into_presenter_error(self, operation: &str) -> PresenterError {
        match self {
            GitHubError::RateLimited { reset_at } => {
                PresenterError::rate_limited(API_NAME, reset_at)
            }
            other => PresenterError::request_failed(operation, other),
        }
    }
}

/// Check if an error is a rate limit error.
pub fn is_rate_limit_error(err: &GitHubError) -> bool {
    matches!(
        err,
        GitHubError::RateLimited { .. } | GitHubError::Api { status: 429, .. }
    )
}

/// Classify a non-success response.
///
/// GitHub signals primary rate limits with a 403 and
/// `x-ratelimit-remaining: 0`, secondary ones with a 429.
pub(crate) fn error_from_response(response: &HttpResponse) -> GitHubError {
    let exhausted = response
        .header("x-ratelimit-remaining")
        .is_some_and(|v| v.trim() == "0");

    if response.status == 429 || (response.status == 403 && exhausted) {
        return GitHubError::RateLimited {
            reset_at: reset_time(response),
        };
    }

    GitHubError::Api {
        status: response.status,
        message: api_message(&response.body),
    }
}

/// When the rate limit lifts: `x-ratelimit-reset` (epoch seconds), else
/// `retry-after` (seconds from now), else one minute from now.
fn reset_time(response: &HttpResponse) -> DateTime<Utc> {
    if let Some(reset_at) = response
        .header("x-ratelimit-reset")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
    {
        return reset_at;
    }

    let wait = response
        .header("retry-after")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_RESET_SECS);
    Utc::now() + Duration::seconds(wait)
}

/// GitHub error bodies are `{"message": "..."}`; fall back to the raw body.
fn api_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}
