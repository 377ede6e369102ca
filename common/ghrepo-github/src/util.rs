//! Utility functions for GitHub operations

use crate::error::{RepositoryError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Prefix every blob URL must start with
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// `<owner>/<repo>/blob/<ref>/<path>`, matched after the prefix is removed
pub const BLOB_URL_PATTERN: &str = r"([^/]+)/([^/]+)/blob/([^/]+)/(.+)";

static BLOB_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(BLOB_URL_PATTERN).expect("blob URL pattern is a valid regex")
});

/// Parse a GitHub "blob view" URL into its file path, owner and repository
///
/// Accepts URLs of the form
/// `https://github.com/<owner>/<repo>/blob/<ref>/<path>[?query]`.
/// Anything after the last `?` is discarded. The ref is required by the
/// grammar but not returned.
///
/// # Returns
/// A tuple containing (path, owner, repository_name)
///
/// # Errors
/// - [`RepositoryError::InvalidUrlFormat`] when the prefix is missing
/// - [`RepositoryError::UrlParseFailure`] when the rest does not match
pub fn parse_blob_url(url: &str) -> Result<(String, String, String)> {
    let rest = url
        .strip_prefix(GITHUB_URL_PREFIX)
        .ok_or(RepositoryError::InvalidUrlFormat {
            prefix: GITHUB_URL_PREFIX,
        })?;

    let rest = match rest.rfind('?') {
        Some(index) => &rest[..index],
        None => rest,
    };

    let captures = BLOB_URL_REGEX
        .captures(rest)
        .ok_or(RepositoryError::UrlParseFailure {
            pattern: BLOB_URL_PATTERN,
        })?;

    let owner = captures[1].to_string();
    let repo = captures[2].to_string();
    let path = captures[4].to_string();
    Ok((path, owner, repo))
}
