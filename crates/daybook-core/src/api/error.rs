//! API error handling
//!
//! Typed errors for journal API calls with descriptive messages and
//! recovery suggestions. Every failure leaves in-memory state untouched;
//! callers decide whether to retry, re-authenticate, or give up.

use thiserror::Error;

/// Errors that can occur while talking to the journal API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never produced a response (connection, DNS, timeout)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The endpoint requires a credential and none was provided
    #[error("Not logged in")]
    MissingCredential,

    /// The response body did not match the expected shape
    #[error("Unexpected response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed
    #[error("Invalid API base URL '{url}': {detail}")]
    InvalidBaseUrl { url: String, detail: String },
}

impl ApiError {
    /// Check if this failure means the credential is absent or rejected
    pub fn is_auth(&self) -> bool {
        match self {
            ApiError::MissingCredential => true,
            ApiError::Status { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ApiError::MissingCredential => Some("Log in first with `daybook login`."),
            ApiError::Status { status: 401, .. } | ApiError::Status { status: 403, .. } => {
                Some("Your session may have expired. Log in again with `daybook login`.")
            }
            ApiError::Transport(_) => {
                Some("Check your network connection and the configured API URL.")
            }
            ApiError::InvalidBaseUrl { .. } => {
                Some("Fix the URL with `daybook config set api_url <url>`.")
            }
            _ => None,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_classification() {
        assert!(ApiError::MissingCredential.is_auth());
        assert!(ApiError::Status {
            status: 401,
            message: "token expired".to_string(),
        }
        .is_auth());
        assert!(ApiError::Status {
            status: 403,
            message: "forbidden".to_string(),
        }
        .is_auth());
        assert!(!ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        }
        .is_auth());
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 404,
            message: "Not found.".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Not found."));
    }

    #[test]
    fn test_recovery_suggestions() {
        assert!(ApiError::MissingCredential.recovery_suggestion().is_some());
        assert!(ApiError::Status {
            status: 401,
            message: String::new(),
        }
        .recovery_suggestion()
        .is_some());
        assert!(ApiError::Status {
            status: 500,
            message: String::new(),
        }
        .recovery_suggestion()
        .is_none());
    }
}
