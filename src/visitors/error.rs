//! Error types for visitor-log lookups.

use thiserror::Error;

/// The visitor-log source could not be asked, or its reply was unusable.
///
/// An empty record list is a valid answer and never maps to one of these.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("visitor log source returned status: {0}")]
    Status(u16),

    /// The response body was not a list of visit records.
    #[error("malformed visitor log payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The configured endpoint could not be turned into a request URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The lookup did not finish within the configured deadline.
    #[error("lookup timed out")]
    Timeout,

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(LookupError::Timeout.to_string(), "lookup timed out");
        assert_eq!(
            LookupError::Status(404).to_string(),
            "visitor log source returned status: 404"
        );
    }
}
