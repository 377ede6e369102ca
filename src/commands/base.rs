//! Base types and traits for the command pattern

use anyhow::Result;
use ghrepo_github::{GitHubClient, RepositoryAdapter};

/// Context passed to all commands
pub struct CommandContext {
    /// Adapter over the configured GitHub API
    pub adapter: RepositoryAdapter<GitHubClient>,
}

impl CommandContext {
    /// Archive downloads share the client's timeout and User-Agent
    pub fn new(client: GitHubClient) -> Self {
        let http = client.http_client().clone();
        Self {
            adapter: RepositoryAdapter::with_http_client(client, http),
        }
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
