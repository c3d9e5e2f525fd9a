//! Error types for the Jenkins client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to a Jenkins server
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// A response lacked a header the API always sends
    #[error("Response is missing the `{0}` header")]
    MissingHeader(&'static str),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The queue item was cancelled before a build started
    #[error("Queue item {0} was cancelled")]
    QueueItemCancelled(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(ClientError::api_error(404, "Not Found").is_not_found());
        assert!(!ClientError::api_error(403, "Forbidden").is_not_found());
        assert!(!ClientError::ParseError("bad".to_string()).is_not_found());
    }

    #[test]
    fn test_api_error_message() {
        let err = ClientError::api_error(500, "boom");
        assert_eq!(err.to_string(), "API error (status 500): boom");
    }
}
