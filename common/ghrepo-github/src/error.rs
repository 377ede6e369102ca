//! Error types for repository operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the repository adapter and the GitHub client.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The URL does not start with the expected GitHub prefix.
    #[error("URL format is incorrect; it does not have the expected prefix: {prefix}")]
    InvalidUrlFormat { prefix: &'static str },

    /// The URL has the prefix but does not match the blob grammar.
    #[error("URL format is incorrect; unable to parse the GitHub URL with pattern {pattern}")]
    UrlParseFailure { pattern: &'static str },

    /// The API answered 404 for the requested resource.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The API answered with any other non-success status.
    #[error("GitHub API request failed ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// The plain archive download did not answer 200.
    #[error("failed to fetch archive: {status}")]
    ArchiveDownload { status: StatusCode },

    /// A repository path argument cannot be used.
    #[error("invalid repository path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// The response did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl RepositoryError {
    /// Whether this error means the remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
