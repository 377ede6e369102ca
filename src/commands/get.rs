//! Get command implementation

use super::{Command, CommandContext, validators};
use crate::utils::write_output;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use std::io::Write;
use std::path::PathBuf;

/// Download a single file, to stdout or to `output`
pub struct GetCommand {
    pub owner: String,
    pub repo: String,
    pub path: String,
    /// Branch, tag or SHA; empty for the default branch
    pub reference: String,
    pub output: Option<PathBuf>,
}

#[async_trait]
impl Command for GetCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_repo_segment("owner", &self.owner)?;
        validators::validate_repo_segment("repo", &self.repo)?;

        let file = context
            .adapter
            .get_file(&self.owner, &self.repo, &self.path, &self.reference)
            .await
            .with_context(|| {
                format!("Failed to fetch {} from {}/{}", self.path, self.owner, self.repo)
            })?;

        match &self.output {
            Some(output) => {
                write_output(output, &file.content)?;
                eprintln!(
                    "{} | {} {} ({} bytes)",
                    format!("{}/{}", self.owner, self.repo).cyan().bold(),
                    "Saved".green(),
                    output.display(),
                    file.content.len()
                );
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&file.content)?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
