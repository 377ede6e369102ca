//! ghrepo - A CLI tool for reading and writing GitHub repository contents

pub mod commands;
pub mod config;
pub mod constants;
pub mod logging;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::Config;
pub use ghrepo_github::{GitHubClient, RepositoryAdapter, RepositoryError};
