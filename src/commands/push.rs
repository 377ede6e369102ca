//! Push command implementation

use super::{Command, CommandContext, validators};
use crate::utils::read_local_file;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use colored::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A local file and the repository path it is committed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    pub local: PathBuf,
    pub remote: String,
}

impl std::str::FromStr for FileMapping {
    type Err = anyhow::Error;

    /// `LOCAL=REMOTE`, or just `PATH` to use the same path in both places
    fn from_str(s: &str) -> Result<Self> {
        let (local, remote) = match s.split_once('=') {
            Some((local, remote)) => (local, remote),
            None => (s, s),
        };
        let remote = remote.trim_start_matches("./").trim_start_matches('/');

        if local.is_empty() || remote.is_empty() {
            bail!("Invalid file mapping '{s}': expected LOCAL=REMOTE or PATH");
        }
        Ok(Self {
            local: PathBuf::from(local),
            remote: remote.to_string(),
        })
    }
}

/// Commit local files to a branch in one commit
pub struct PushCommand {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub message: String,
    pub files: Vec<FileMapping>,
}

impl PushCommand {
    /// Read every mapped file, rejecting duplicate repository paths
    pub fn collect_files(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        let mut files = BTreeMap::new();
        for mapping in &self.files {
            let content = read_local_file(&mapping.local)?;
            if files.insert(mapping.remote.clone(), content).is_some() {
                bail!("Repository path '{}' is given more than once", mapping.remote);
            }
        }
        Ok(files)
    }
}

#[async_trait]
impl Command for PushCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_repo_segment("owner", &self.owner)?;
        validators::validate_repo_segment("repo", &self.repo)?;
        validators::validate_branch_name(&self.branch)?;
        validators::validate_commit_message(&self.message)?;
        if self.files.is_empty() {
            return Err(validators::validation_error_to_anyhow(
                validators::CommandValidationError::EmptyCollection {
                    argument: "file list".to_string(),
                },
            ));
        }

        let files = self.collect_files()?;
        context
            .adapter
            .push_files_to_repository(&files, &self.owner, &self.repo, &self.branch, &self.message)
            .await
            .with_context(|| {
                format!(
                    "Failed to push to {}/{} on branch {}",
                    self.owner, self.repo, self.branch
                )
            })?;

        println!(
            "{} | {} {} file(s) to {}",
            format!("{}/{}", self.owner, self.repo).cyan().bold(),
            "Pushed".green(),
            files.len(),
            self.branch
        );
        Ok(())
    }
}
