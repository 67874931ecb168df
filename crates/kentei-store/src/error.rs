//! Store error types.

use thiserror::Error;

/// Errors that can occur when talking to a question store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Authentication failed (invalid or expired API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The backend returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}
