//! Configuration file loading

use crate::constants;
use anyhow::{Context, Result};
use ghrepo_github::GitHubClient;
use ghrepo_github::types::constants as api;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root; `https://<host>/api/v3` for GitHub Enterprise
    pub api_base: String,
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Per-request timeout in seconds; none when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: api::GITHUB_API_BASE.to_string(),
            user_agent: api::DEFAULT_USER_AGENT.to_string(),
            token: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;

        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {path}"))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise start from defaults
    ///
    /// A token missing from both the file and `token_override` is taken from
    /// `GITHUB_TOKEN`.
    pub fn load_config(path: &str, token_override: Option<String>) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::load(path)?
        } else {
            tracing::debug!(%path, "config file not found, using defaults");
            Config::default()
        };

        if let Some(token) = token_override {
            config.token = Some(token);
        } else if config.token.is_none() {
            config.token = std::env::var(constants::github::TOKEN_ENV)
                .ok()
                .filter(|token| !token.trim().is_empty());
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            anyhow::bail!(
                "Invalid api_base '{}': must be an http(s) URL",
                self.api_base
            );
        }
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent cannot be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build an API client from this configuration
    pub fn github_client(&self) -> Result<GitHubClient> {
        GitHubClient::builder()
            .api_base(self.api_base.as_str())
            .user_agent(self.user_agent.as_str())
            .token(self.token.clone())
            .timeout(self.timeout())
            .build()
            .context("Failed to create GitHub client")
    }
}
