//! Parse-url command implementation

use super::{Command, CommandContext};
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Split a GitHub blob URL into owner, repository and path
pub struct ParseUrlCommand {
    pub url: String,
}

#[async_trait]
impl Command for ParseUrlCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let (path, owner, repo) = context.adapter.parse_url(&self.url)?;
        println!("{} {}", "owner:".bold(), owner);
        println!("{} {}", "repo: ".bold(), repo);
        println!("{} {}", "path: ".bold(), path);
        Ok(())
    }
}
