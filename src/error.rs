//! Error types for the wikisage crate
//!
//! Each module reports its own failure modes through a domain-specific enum
//! (`FetchError`, `ExtractError`, `LlmError`); the command layer aggregates
//! them with `anyhow` context. Fetch errors carry a recoverability
//! classification so orchestrators can tell transient network failures apart
//! from revisions that will never resolve.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error (connection, DNS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status returned by the server
    #[error("Server returned status {0}")]
    Status(u16),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Admission gate was closed while waiting for a permit
    #[error("Admission gate closed")]
    GateClosed,

    /// Page extraction failed after a successful fetch
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

impl FetchError {
    /// Whether retrying the same fetch may succeed
    ///
    /// Network-level failures and 5xx responses are transient; a 4xx, a
    /// closed gate, or an extraction failure will repeat on every attempt.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::Status(code) => *code >= 500,
            Self::GateClosed | Self::Extract(_) => false,
        }
    }
}

/// Errors that can occur while extracting a page from HTML
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Neither the page heading nor the document title could be found
    #[error("Title not found in page")]
    TitleNotFound,

    /// The document is not parseable HTML at all
    #[error("Malformed document")]
    MalformedDocument,
}

/// Errors from the external text-generation endpoint
#[derive(Error, Debug)]
pub enum LlmError {
    /// HTTP-level failure talking to the endpoint
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the endpoint
    #[error("LLM endpoint returned status {0}")]
    Status(u16),

    /// Response body did not contain the expected output field
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_recoverability() {
        assert!(FetchError::Timeout.is_recoverable());
        assert!(FetchError::Status(503).is_recoverable());
        assert!(!FetchError::Status(404).is_recoverable());
        assert!(!FetchError::GateClosed.is_recoverable());
        assert!(!FetchError::Extract(ExtractError::TitleNotFound).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            FetchError::Status(404).to_string(),
            "Server returned status 404"
        );
        assert_eq!(
            FetchError::Extract(ExtractError::TitleNotFound).to_string(),
            "Extraction failed: Title not found in page"
        );
        assert_eq!(
            LlmError::Status(502).to_string(),
            "LLM endpoint returned status 502"
        );
    }
}
