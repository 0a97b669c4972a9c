//! Backend fetch errors
//!
//! Every way a panel fetch can fail. Panels only care that it failed;
//! the variants exist for the log line.

use thiserror::Error;

/// Errors that can occur when fetching from the bot backend
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection refused or host unreachable
    #[error("Backend unavailable")]
    Unavailable,

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not JSON or did not match the expected schema
    #[error("Invalid response from {endpoint}: {error}")]
    Decode { endpoint: String, error: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Unavailable
        } else {
            FetchError::Request(err)
        }
    }
}

/// Result type alias for backend fetches
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 500: boom");

        let err = FetchError::Decode {
            endpoint: "/api/games/stats".to_string(),
            error: "missing field `games`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid response from /api/games/stats: missing field `games`"
        );
    }
}
