//! Repository operations built on a [`RepositoryApi`]
//!
//! The adapter is stateless: it holds the injected API handle and a plain
//! HTTP client for archive downloads. Every operation is a short, strictly
//! sequential series of remote calls and either fully succeeds or returns
//! the first error.

use crate::api::RepositoryApi;
use crate::error::{RepositoryError, Result};
use crate::types::{ArchiveFormat, File, FileDeleteOptions, NewCommit, NewTreeEntry, TreeEntry};
use crate::util;
use reqwest::{Client, StatusCode};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Redirect hops allowed while resolving an archive link
pub const ARCHIVE_MAX_REDIRECTS: u8 = 3;

/// Branch folder deletions are committed to
pub const DELETE_DIRS_BRANCH: &str = "main";

/// Placeholder file that keeps an otherwise empty folder in git
pub const FOLDER_PLACEHOLDER: &str = ".gitkeep";

pub struct RepositoryAdapter<A> {
    api: A,
    http: Client,
}

impl<A: RepositoryApi> RepositoryAdapter<A> {
    pub fn new(api: A) -> Self {
        Self::with_http_client(api, Client::new())
    }

    /// Use `http` for the archive download instead of a default client
    pub fn with_http_client(api: A, http: Client) -> Self {
        Self { api, http }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Split a blob URL into (path, owner, repo); see [`util::parse_blob_url`]
    pub fn parse_url(&self, url: &str) -> Result<(String, String, String)> {
        util::parse_blob_url(url)
    }

    /// Download one file at `reference`; an empty reference means the default branch
    pub async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<File> {
        let content = self
            .api
            .download_contents(owner, repo, path, reference)
            .await?;
        Ok(File {
            name: path.to_string(),
            content,
        })
    }

    /// Download the tarball of the repository at `reference`
    pub async fn get_repository_archive(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> Result<Vec<u8>> {
        let link = self
            .api
            .get_archive_link(
                owner,
                repo,
                ArchiveFormat::Tarball,
                reference,
                ARCHIVE_MAX_REDIRECTS,
            )
            .await?;
        debug!(%owner, %repo, %reference, host = ?link.host_str(), "downloading archive");

        let response = self.http.get(link).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(RepositoryError::ArchiveDownload { status });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// SHA reported by the contents endpoint for `path` at `reference`
    ///
    /// Despite the name this is the file's blob SHA, not the SHA of a commit
    /// that touched it.
    pub async fn get_latest_commit_hash(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String> {
        let content = self.api.get_contents(owner, repo, path, reference).await?;
        Ok(content.sha)
    }

    /// Commit `files` (path -> content) to `branch` in a single commit
    ///
    /// Reads the branch tip, layers the files over its tree, creates the
    /// commit and force-moves the branch to it. Only the final ref update is
    /// visible to other readers; a failure in any earlier step leaves the
    /// branch untouched. Concurrent pushes to the same branch can overwrite
    /// each other.
    pub async fn push_files_to_repository(
        &self,
        files: &BTreeMap<String, Vec<u8>>,
        owner: &str,
        repo: &str,
        branch: &str,
        commit_message: &str,
    ) -> Result<()> {
        let reference = format!("refs/heads/{branch}");
        let tip = self.api.get_ref(owner, repo, &reference).await?.object.sha;
        let base_tree = self.api.get_tree(owner, repo, &tip, false).await?;

        let entries = build_tree_entries(files, &base_tree.entries);
        let tree = self.api.create_tree(owner, repo, &tip, &entries).await?;

        let commit = self
            .api
            .create_commit(
                owner,
                repo,
                &NewCommit {
                    message: commit_message.to_string(),
                    tree: tree.sha,
                    parents: vec![tip.clone()],
                },
            )
            .await?;

        self.api
            .update_ref(owner, repo, &reference, &commit.sha, true)
            .await?;
        info!(
            %owner, %repo, %branch, parent = %tip, commit = %commit.sha,
            files = files.len(),
            "pushed files"
        );
        Ok(())
    }

    /// Delete folders by removing their `.gitkeep` placeholder on `main`
    ///
    /// Each folder is its own commit. A folder whose placeholder is already
    /// gone counts as deleted. An empty folder name fails before anything is
    /// deleted, since it would address the root placeholder.
    pub async fn delete_dirs<S: AsRef<str>>(
        &self,
        owner: &str,
        repo: &str,
        folder_paths: &[S],
    ) -> Result<()> {
        if let Some(empty) = folder_paths
            .iter()
            .map(|folder| folder.as_ref())
            .find(|folder: &&str| folder.trim_matches('/').is_empty())
        {
            return Err(RepositoryError::InvalidPath {
                path: empty.to_string(),
                reason: "folder name is empty",
            });
        }

        for folder in folder_paths {
            let folder = folder.as_ref();
            let path = format!("{folder}/{FOLDER_PLACEHOLDER}");
            let options = FileDeleteOptions {
                message: format!("Delete folder {folder}"),
                sha: None,
                branch: Some(DELETE_DIRS_BRANCH.to_string()),
            };

            match self.api.delete_file(owner, repo, &path, &options).await {
                Ok(()) => info!(%owner, %repo, %folder, "deleted folder"),
                Err(e) if e.is_not_found() => {
                    debug!(%owner, %repo, %folder, "placeholder already absent")
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// New blob entries for `files`, followed by the base entries they don't replace
fn build_tree_entries(
    files: &BTreeMap<String, Vec<u8>>,
    base: &[TreeEntry],
) -> Vec<NewTreeEntry> {
    let replaced: HashSet<&str> = files.keys().map(String::as_str).collect();

    files
        .iter()
        .map(|(path, content)| NewTreeEntry::blob(path, String::from_utf8_lossy(content)))
        .chain(
            base.iter()
                .filter(|entry| !replaced.contains(entry.path.as_str()))
                .map(NewTreeEntry::existing),
        )
        .collect()
}
