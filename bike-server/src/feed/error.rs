//! Station feed error types.

/// Errors that can occur during one feed refresh cycle.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the payload
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// No station survived coordinate validation
    #[error("feed returned no stations with valid coordinates")]
    Empty,
}
