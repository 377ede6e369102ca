//! Command argument validation utilities
//!
//! This module provides centralized validation logic for command arguments
//! after clap parsing. Everything here runs before any network call.

use anyhow::{Result, anyhow};

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    /// Empty collection when at least one item is required
    EmptyCollection { argument: String },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
            CommandValidationError::EmptyCollection { argument } => {
                write!(f, "{} cannot be empty", argument)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// Convert validation error to anyhow::Error
pub fn validation_error_to_anyhow(error: CommandValidationError) -> anyhow::Error {
    anyhow!(error.to_string())
}

fn invalid(argument: &str, value: &str, reason: &str) -> anyhow::Error {
    validation_error_to_anyhow(CommandValidationError::InvalidValue {
        argument: argument.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

/// Validate an owner or repository name: one non-empty path segment
pub fn validate_repo_segment(argument: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(argument, value, "cannot be empty or whitespace only"));
    }
    if value.contains('/') {
        return Err(invalid(argument, value, "must not contain '/'"));
    }
    Ok(())
}

/// Validate a branch name
pub fn validate_branch_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid(
            "branch",
            name,
            "branch name cannot be empty or whitespace only",
        ));
    }

    // Basic Git branch name validation
    if name.starts_with('-')
        || name.ends_with('.')
        || name.ends_with('/')
        || name.contains("..")
        || name.contains(' ')
    {
        return Err(invalid("branch", name, "invalid Git branch name format"));
    }
    Ok(())
}

/// Validate commit message
pub fn validate_commit_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(invalid(
            "commit message",
            message,
            "commit message cannot be empty or whitespace only",
        ));
    }
    Ok(())
}

/// Validate folder paths for deletion
///
/// At least one folder is required and none may be empty or absolute.
pub fn validate_folder_paths(folders: &[String]) -> Result<()> {
    if folders.is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::EmptyCollection {
                argument: "folder list".to_string(),
            },
        ));
    }
    for folder in folders {
        if folder.trim().is_empty() {
            return Err(invalid("folder", folder, "folder cannot be empty"));
        }
        if folder.starts_with('/') || folder.ends_with('/') {
            return Err(invalid(
                "folder",
                folder,
                "folder must be relative to the repository root without a trailing '/'",
            ));
        }
    }
    Ok(())
}
