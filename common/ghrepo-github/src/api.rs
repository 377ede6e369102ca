//! The remote operations the adapter depends on
//!
//! [`RepositoryApi`] is deliberately narrow: exactly the endpoints
//! [`crate::RepositoryAdapter`] calls. [`GitHubClient`] implements it over
//! the REST API; tests implement it with in-memory fakes.

use crate::client::GitHubClient;
use crate::error::Result;
use crate::types::{
    ArchiveFormat, Commit, FileDeleteOptions, NewCommit, NewTreeEntry, Reference,
    RepositoryContent, Tree,
};
use async_trait::async_trait;
use url::Url;

#[async_trait]
pub trait RepositoryApi: Send + Sync {
    async fn get_ref(&self, owner: &str, repo: &str, reference: &str) -> Result<Reference>;

    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<Reference>;

    async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        recursive: bool,
    ) -> Result<Tree>;

    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[NewTreeEntry],
    ) -> Result<Tree>;

    async fn create_commit(&self, owner: &str, repo: &str, commit: &NewCommit) -> Result<Commit>;

    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<RepositoryContent>;

    /// Full raw content; the response is consumed before returning
    async fn download_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<u8>>;

    async fn delete_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        options: &FileDeleteOptions,
    ) -> Result<()>;

    async fn get_archive_link(
        &self,
        owner: &str,
        repo: &str,
        format: ArchiveFormat,
        reference: &str,
        max_redirects: u8,
    ) -> Result<Url>;
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    async fn get_ref(&self, owner: &str, repo: &str, reference: &str) -> Result<Reference> {
        GitHubClient::get_ref(self, owner, repo, reference).await
    }

    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<Reference> {
        GitHubClient::update_ref(self, owner, repo, reference, sha, force).await
    }

    async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        recursive: bool,
    ) -> Result<Tree> {
        GitHubClient::get_tree(self, owner, repo, sha, recursive).await
    }

    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[NewTreeEntry],
    ) -> Result<Tree> {
        GitHubClient::create_tree(self, owner, repo, base_tree, entries).await
    }

    async fn create_commit(&self, owner: &str, repo: &str, commit: &NewCommit) -> Result<Commit> {
        GitHubClient::create_commit(self, owner, repo, commit).await
    }

    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<RepositoryContent> {
        GitHubClient::get_contents(self, owner, repo, path, reference).await
    }

    async fn download_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<u8>> {
        GitHubClient::download_contents(self, owner, repo, path, reference).await
    }

    async fn delete_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        options: &FileDeleteOptions,
    ) -> Result<()> {
        GitHubClient::delete_file(self, owner, repo, path, options).await
    }

    async fn get_archive_link(
        &self,
        owner: &str,
        repo: &str,
        format: ArchiveFormat,
        reference: &str,
        max_redirects: u8,
    ) -> Result<Url> {
        GitHubClient::get_archive_link(self, owner, repo, format, reference, max_redirects).await
    }
}
