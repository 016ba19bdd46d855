//! Publishing the updated list through git.
//!
//! The pipeline only knows the [`Publisher`] capability. [`GitPublisher`]
//! implements it as `git add`, `git commit` and `git push`, stopping at the
//! first step that fails.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cmd_abstraction::{args_to_strings, CommandExecutor};
use crate::error::Post405Error;

/// Propagate a changed artifact to wherever it is shared.
pub trait Publisher {
    fn publish(&self, file: &Path, message: &str) -> Result<()>;
}

/// Commit message for a run that added `added` IPs at time `at`.
pub fn commit_message(added: usize, at: DateTime<Utc>) -> String {
    format!(
        "Update IP list: +{} @ {}",
        added,
        at.format("%Y-%m-%dT%H:%M:%SZ")
    )
}

/// Where and how to push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOptions {
    /// git executable, `git` unless overridden in config
    pub binary: String,
    /// Working tree every command runs in
    pub repo: PathBuf,
    pub remote: Option<String>,
    pub branch: Option<String>,
    /// Commit only, leave pushing to someone else
    pub push: bool,
}

impl Default for GitOptions {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
            repo: PathBuf::from("."),
            remote: None,
            branch: None,
            push: true,
        }
    }
}

pub struct GitPublisher<E: CommandExecutor> {
    executor: E,
    options: GitOptions,
}

impl<E: CommandExecutor> GitPublisher<E> {
    pub fn new(executor: E, options: GitOptions) -> Self {
        Self { executor, options }
    }

    fn push_args(&self) -> Vec<String> {
        let mut args = vec!["push".to_string()];
        if let Some(remote) = &self.options.remote {
            args.push(remote.clone());
            if let Some(branch) = &self.options.branch {
                args.push(branch.clone());
            }
        }
        args
    }

    fn run_step(&self, step: &str, args: &[String]) -> Result<()> {
        debug!("git {}", args.join(" "));
        let output = self
            .executor
            .execute(&self.options.binary, args, &self.options.repo)
            .map_err(|e| Post405Error::Publish {
                step: step.to_string(),
                detail: format!("{:#}", e),
            })?;

        if !output.success {
            return Err(Post405Error::Publish {
                step: step.to_string(),
                detail: output.failure_detail(),
            }
            .into());
        }
        Ok(())
    }
}

impl<E: CommandExecutor> Publisher for GitPublisher<E> {
    fn publish(&self, file: &Path, message: &str) -> Result<()> {
        let file_arg = file.to_string_lossy();
        self.run_step("add", &args_to_strings(&["add", "--", file_arg.as_ref()]))?;
        self.run_step("commit", &args_to_strings(&["commit", "-m", message]))?;

        if self.options.push {
            self.run_step("push", &self.push_args())?;
            info!("Committed and pushed {}", file.display());
        } else {
            info!("Committed {} (push disabled)", file.display());
        }
        Ok(())
    }
}
