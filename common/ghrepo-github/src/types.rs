//! GitHub API data types
//!
//! Request and response bodies for the git data, contents and archive
//! endpoints, plus the [`File`] value returned to callers.

use serde::{Deserialize, Serialize};

/// GitHub API constants
pub mod constants {
    /// GitHub API base URL
    pub const GITHUB_API_BASE: &str = "https://api.github.com";

    /// Default User-Agent header for API requests
    pub const DEFAULT_USER_AGENT: &str = concat!("ghrepo/", env!("CARGO_PKG_VERSION"));

    /// Accept header for JSON responses
    pub const ACCEPT_JSON: &str = "application/vnd.github+json";

    /// Accept header asking the contents endpoint for raw bytes
    pub const ACCEPT_RAW: &str = "application/vnd.github.raw";

    /// API version pinned on every request
    pub const API_VERSION: &str = "2022-11-28";

    /// File mode of a regular, non-executable file
    pub const REGULAR_FILE_MODE: &str = "100644";
}

/// A file downloaded from a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Repository path the file was requested at
    pub name: String,
    pub content: Vec<u8>,
}

/// A git reference such as `refs/heads/main`
#[derive(Deserialize, Debug, Clone)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: GitObject,
}

/// The object a reference points at
#[derive(Deserialize, Debug, Clone)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A tree as returned by `GET /git/trees/{sha}`
#[derive(Deserialize, Debug, Clone)]
pub struct Tree {
    pub sha: String,
    #[serde(rename = "tree")]
    pub entries: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: Option<String>,
    pub size: Option<u64>,
}

/// An entry submitted to `POST /git/trees`
///
/// Exactly one of `sha` and `content` is set.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewTreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NewTreeEntry {
    /// A regular file whose blob GitHub creates from `content`
    pub fn blob(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: constants::REGULAR_FILE_MODE.to_string(),
            kind: "blob".to_string(),
            sha: None,
            content: Some(content.into()),
        }
    }

    /// An entry carried over unchanged from an existing tree
    pub fn existing(entry: &TreeEntry) -> Self {
        Self {
            path: entry.path.clone(),
            mode: entry.mode.clone(),
            kind: entry.kind.clone(),
            sha: entry.sha.clone(),
            content: None,
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateTreePayload<'a> {
    pub base_tree: &'a str,
    pub tree: &'a [NewTreeEntry],
}

#[derive(Deserialize, Debug, Clone)]
pub struct Commit {
    pub sha: String,
    pub tree: CommitTree,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitTree {
    pub sha: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitParent {
    pub sha: String,
}

/// Body of `POST /git/commits`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewCommit {
    pub message: String,
    /// SHA of the tree the commit snapshots
    pub tree: String,
    pub parents: Vec<String>,
}

#[derive(Serialize, Debug)]
pub(crate) struct UpdateRefPayload<'a> {
    pub sha: &'a str,
    pub force: bool,
}

/// Metadata of a single file from the contents endpoint
#[derive(Deserialize, Debug, Clone)]
pub struct RepositoryContent {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Options for `DELETE /contents/{path}`
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDeleteOptions {
    pub message: String,
    /// Blob SHA of the file; looked up on `branch` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tarball,
    Zipball,
}

impl ArchiveFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Tarball => "tarball",
            ArchiveFormat::Zipball => "zipball",
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
