//! Configuration management for post405.
//!
//! Everything here can also be given on the command line. A config file is
//! only read when `--config` is passed; explicit flags always win over it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::Post405Error;
use crate::publisher::GitOptions;

/// Default name of the persisted IP list
pub const DEFAULT_OUTPUT: &str = "clients_405_post.txt";

/// Optional YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted IP list
    pub output: PathBuf,

    /// Working tree used for every git command
    pub repo: PathBuf,

    /// git executable
    pub git_binary: String,

    /// Push target; `git push` with no arguments when unset
    pub remote: Option<String>,

    /// Branch to push, only meaningful together with `remote`
    pub branch: Option<String>,

    /// Push after committing
    pub push: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            repo: PathBuf::from("."),
            git_binary: "git".to_string(),
            remote: None,
            branch: None,
            push: true,
        }
    }
}

/// Reject values git would read as an option instead of a name
fn check_git_word(field: &str, value: &str) -> Result<(), Post405Error> {
    if value.trim().is_empty() {
        return Err(Post405Error::Config(format!("{} must not be empty", field)));
    }
    if value.starts_with('-') {
        return Err(Post405Error::Config(format!(
            "{} must not start with '-': {}",
            field, value
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Post405Error> {
        if self.output.as_os_str().is_empty() {
            return Err(Post405Error::Config("output must not be empty".to_string()));
        }
        check_git_word("git_binary", &self.git_binary)?;
        if let Some(remote) = &self.remote {
            check_git_word("remote", remote)?;
        }
        if let Some(branch) = &self.branch {
            check_git_word("branch", branch)?;
            if self.remote.is_none() {
                return Err(Post405Error::Config(
                    "branch requires remote to be set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Effective settings of one run after merging CLI, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_file: PathBuf,
    pub output: PathBuf,
    pub git: GitOptions,
    pub dry_run: bool,
}

impl Settings {
    /// Combine command line and config, the command line taking precedence.
    pub fn resolve(cli: &Cli, config: Config) -> Result<Self> {
        let merged = Config {
            output: cli.output.clone().unwrap_or(config.output),
            repo: cli.repo.clone().unwrap_or(config.repo),
            git_binary: config.git_binary,
            remote: cli.remote.clone().or(config.remote),
            branch: cli.branch.clone().or(config.branch),
            push: config.push && !cli.no_push,
        };
        merged.validate()?;

        Ok(Self {
            log_file: cli.logfile.clone(),
            output: merged.output,
            git: GitOptions {
                binary: merged.git_binary,
                repo: merged.repo,
                remote: merged.remote,
                branch: merged.branch,
                push: merged.push,
            },
            dry_run: cli.dry_run,
        })
    }

    /// Load the config file named on the command line, if any, and resolve.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        Self::resolve(cli, config)
    }
}
