//! Error types for the directory client.

use thiserror::Error;

/// Result type for directory client operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Directory client errors.
///
/// A lookup that completes but matches nothing is not an error; those
/// operations return `Ok(None)` or an empty list instead.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport failure (connection refused, timeout, malformed body)
    #[error("Transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the directory service
    #[error("Directory API error ({status}): {message}")]
    Api { status: u16, message: String },
}
