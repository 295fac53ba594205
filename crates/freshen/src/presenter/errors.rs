use chrono::{DateTime, Utc};
use thiserror::Error;

/// Terminal error recorded by a presenter.
///
/// Once a presenter holds one of these it is final for the run; nothing in
/// the pipeline retries.
#[derive(Debug, Clone, Error)]
pub enum PresenterError {
    /// Upstream API rate limit exceeded.
    #[error(
        "{api} API rate limit exceeded; it will be reset {}",
        reset_phrase(.reset_at)
    )]
    RateLimited {
        api: String,
        reset_at: DateTime<Utc>,
    },

    /// An upstream request failed for any other reason.
    #[error("{operation}: {message}")]
    RequestFailed { operation: String, message: String },

    /// Unexpected/internal error.
    #[error("{message}")]
    Internal { message: String },
}

impl PresenterError {
    /// Create a rate limit error for the named API.
    #[inline]
    pub fn rate_limited(api: impl Into<String>, reset_at: DateTime<Utc>) -> Self {
        Self::RateLimited {
            api: api.into(),
            reset_at,
        }
    }

    /// Create a request failure naming the operation that failed.
    #[inline]
    pub fn request_failed(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::RequestFailed {
            operation: operation.into(),
            message: cause.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Human-relative phrase for a rate limit reset time, e.g. `in 2m 5s`.
pub fn reset_phrase(reset_at: &DateTime<Utc>) -> String {
    let remaining = reset_at.signed_duration_since(Utc::now());
    if remaining.num_seconds() > 0 {
        format!("in {}", format_duration(remaining))
    } else {
        "now".to_string()
    }
}

/// Format a duration in a human-readable way.
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_secs = duration.num_seconds();
    if total_secs < 60 {
        format!("{}s", total_secs)
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        if secs > 0 {
            format!("{}m {}s", mins, secs)
        } else {
            format!("{}m", mins)
        }
    } else {
        let hours = total_secs / 3600;
        let mins = (total_secs % 3600) / 60;
        if mins > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    }
}

/// Extract a short error message suitable for one-line display.
///
/// Takes the first line of an error message; presenters may carry upstream
/// bodies spanning several lines.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}
