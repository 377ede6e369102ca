//! Archive command implementation

use super::{Command, CommandContext, validators};
use crate::utils::write_output;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use std::path::PathBuf;

/// Download the repository tarball to `output`
pub struct ArchiveCommand {
    pub owner: String,
    pub repo: String,
    pub reference: String,
    pub output: PathBuf,
}

#[async_trait]
impl Command for ArchiveCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_repo_segment("owner", &self.owner)?;
        validators::validate_repo_segment("repo", &self.repo)?;

        let archive = context
            .adapter
            .get_repository_archive(&self.owner, &self.repo, &self.reference)
            .await
            .with_context(|| format!("Failed to download archive of {}/{}", self.owner, self.repo))?;

        write_output(&self.output, &archive)?;
        println!(
            "{} | {} {} ({} bytes)",
            format!("{}/{}", self.owner, self.repo).cyan().bold(),
            "Archive saved to".green(),
            self.output.display(),
            archive.len()
        );
        Ok(())
    }
}
