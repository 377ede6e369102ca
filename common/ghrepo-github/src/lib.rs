//! GitHub repository adapter library
//!
//! Fetch files and archives from GitHub repositories, look up file SHAs,
//! commit several files at once and delete placeholder folders.
//!
//! ## Modules
//!
//! - [`adapter`]: The six repository operations over a [`RepositoryApi`]
//! - [`api`]: The narrow remote API trait
//! - [`client`]: `reqwest`-based GitHub REST client
//! - [`error`]: Error types
//! - [`types`]: Request and response bodies
//! - [`util`]: Blob URL parsing

pub mod adapter;
pub mod api;
mod auth;
pub mod client;
pub mod error;
mod git;
mod repositories;
pub mod types;
pub mod util;

// Re-export public API
pub use adapter::RepositoryAdapter;
pub use api::RepositoryApi;
pub use auth::GitHubAuth;
pub use client::{GitHubClient, GitHubClientBuilder};
pub use error::{RepositoryError, Result};
pub use types::{
    ArchiveFormat, Commit, File, FileDeleteOptions, GitObject, NewCommit, NewTreeEntry,
    Reference, RepositoryContent, Tree, TreeEntry,
};
pub use util::parse_blob_url;
