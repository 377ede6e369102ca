//! Sha command implementation

use super::{Command, CommandContext, validators};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Print the blob SHA of a file at a reference
pub struct ShaCommand {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub reference: String,
}

#[async_trait]
impl Command for ShaCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_repo_segment("owner", &self.owner)?;
        validators::validate_repo_segment("repo", &self.repo)?;

        let sha = context
            .adapter
            .get_latest_commit_hash(&self.owner, &self.repo, &self.path, &self.reference)
            .await
            .with_context(|| {
                format!("Failed to look up {} in {}/{}", self.path, self.owner, self.repo)
            })?;
        println!("{sha}");
        Ok(())
    }
}
