//! Rm-dirs command implementation

use super::{Command, CommandContext, validators};
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;

/// Delete folders by removing their `.gitkeep` placeholders
pub struct RmDirsCommand {
    pub owner: String,
    pub repo: String,
    pub folders: Vec<String>,
}

#[async_trait]
impl Command for RmDirsCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_repo_segment("owner", &self.owner)?;
        validators::validate_repo_segment("repo", &self.repo)?;
        validators::validate_folder_paths(&self.folders)?;

        context
            .adapter
            .delete_dirs(&self.owner, &self.repo, &self.folders)
            .await
            .with_context(|| format!("Failed to delete folders in {}/{}", self.owner, self.repo))?;

        println!(
            "{} | {} {}",
            format!("{}/{}", self.owner, self.repo).cyan().bold(),
            "Deleted".green(),
            self.folders.join(", ")
        );
        Ok(())
    }
}
