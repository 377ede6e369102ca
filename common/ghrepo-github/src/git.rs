//! Git data API operations: references, trees and commits

use crate::client::{GitHubClient, check_status};
use crate::error::Result;
use crate::types::constants::ACCEPT_JSON;
use crate::types::{
    Commit, CreateTreePayload, NewCommit, NewTreeEntry, Reference, Tree, UpdateRefPayload,
};
use reqwest::Method;
use tracing::debug;

/// `refs/heads/main` -> `heads/main`, the form the refs endpoints take
fn short_ref(reference: &str) -> &str {
    reference.strip_prefix("refs/").unwrap_or(reference)
}

impl GitHubClient {
    /// Resolve a fully qualified reference such as `refs/heads/main`
    pub async fn get_ref(&self, owner: &str, repo: &str, reference: &str) -> Result<Reference> {
        let url = self.endpoint(&["repos", owner, repo, "git", "ref", short_ref(reference)])?;
        debug!(%owner, %repo, %reference, "fetching reference");

        let response = self.request(Method::GET, url, ACCEPT_JSON).send().await?;
        let response = check_status(response, &format!("{owner}/{repo} {reference}")).await?;
        Ok(response.json().await?)
    }

    /// Point a reference at `sha`; `force` allows non-fast-forward updates
    pub async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<Reference> {
        let url = self.endpoint(&["repos", owner, repo, "git", "refs", short_ref(reference)])?;
        debug!(%owner, %repo, %reference, %sha, force, "updating reference");

        let response = self
            .request(Method::PATCH, url, ACCEPT_JSON)
            .json(&UpdateRefPayload { sha, force })
            .send()
            .await?;
        let response = check_status(response, &format!("{owner}/{repo} {reference}")).await?;
        Ok(response.json().await?)
    }

    /// Fetch a tree by SHA; a commit SHA resolves to that commit's tree
    pub async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        recursive: bool,
    ) -> Result<Tree> {
        let url = self.endpoint(&["repos", owner, repo, "git", "trees", sha])?;
        debug!(%owner, %repo, %sha, recursive, "fetching tree");

        let mut request = self.request(Method::GET, url, ACCEPT_JSON);
        if recursive {
            request = request.query(&[("recursive", "1")]);
        }
        let response = check_status(request.send().await?, &format!("{owner}/{repo} tree {sha}"))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[NewTreeEntry],
    ) -> Result<Tree> {
        let url = self.endpoint(&["repos", owner, repo, "git", "trees"])?;
        debug!(%owner, %repo, %base_tree, entries = entries.len(), "creating tree");

        let response = self
            .request(Method::POST, url, ACCEPT_JSON)
            .json(&CreateTreePayload {
                base_tree,
                tree: entries,
            })
            .send()
            .await?;
        let response = check_status(response, &format!("{owner}/{repo} trees")).await?;
        Ok(response.json().await?)
    }

    pub async fn create_commit(&self, owner: &str, repo: &str, commit: &NewCommit) -> Result<Commit> {
        let url = self.endpoint(&["repos", owner, repo, "git", "commits"])?;
        debug!(%owner, %repo, tree = %commit.tree, parents = ?commit.parents, "creating commit");

        let response = self
            .request(Method::POST, url, ACCEPT_JSON)
            .json(commit)
            .send()
            .await?;
        let response = check_status(response, &format!("{owner}/{repo} commits")).await?;
        Ok(response.json().await?)
    }
}
