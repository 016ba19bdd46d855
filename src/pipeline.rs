//! One run of post405: load, extract, merge, then persist and publish.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::Settings;
use crate::error::Post405Error;
use crate::extractor::extract_from_file;
use crate::fs_abstraction::FileSystem;
use crate::iplist;
use crate::merge::{merge, MergeOutcome};
use crate::publisher::{commit_message, Publisher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No qualifying log lines
    NothingFound,
    /// Matches found, all already listed
    NoNewIps,
    /// List would grow, but this was a dry run
    WouldUpdate,
    /// List written (and handed to the publisher)
    Updated,
}

/// Outcome of a run, printed with `--json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub log_file: PathBuf,
    pub output: PathBuf,
    pub status: RunStatus,
    /// Distinct client IPs in the log
    pub found: usize,
    /// IPs not previously listed
    pub added: usize,
    /// Entries in the list after the run
    pub total: usize,
    pub commit_message: Option<String>,
    /// `None` unless publishing was attempted
    pub published: Option<bool>,
    pub publish_error: Option<String>,
}

impl RunSummary {
    fn new(settings: &Settings, status: RunStatus) -> Self {
        Self {
            log_file: settings.log_file.clone(),
            output: settings.output.clone(),
            status,
            found: 0,
            added: 0,
            total: 0,
            commit_message: None,
            published: None,
            publish_error: None,
        }
    }
}

/// Path handed to git. git runs inside the repository, so a path relative to
/// our own working directory has to be made absolute first.
fn publish_path(output: &Path) -> PathBuf {
    std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf())
}

/// Execute the pipeline.
///
/// Publishing failures are logged and recorded in the summary but do not make
/// the run fail: the list has already been written at that point.
pub fn run(
    settings: &Settings,
    fs: &dyn FileSystem,
    publisher: &dyn Publisher,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    if !fs.exists(&settings.log_file) {
        return Err(Post405Error::LogNotFound(settings.log_file.clone()).into());
    }

    let existing = iplist::load_existing(fs, &settings.output)?;
    let previous_total = existing.len();
    let new_ips = extract_from_file(fs, &settings.log_file)?;

    match merge(existing, &new_ips) {
        MergeOutcome::NothingFound => {
            info!("No '405 - POST' lines in the log, nothing to add");
            Ok(RunSummary {
                total: previous_total,
                ..RunSummary::new(settings, RunStatus::NothingFound)
            })
        }
        MergeOutcome::NoNewIps { found } => {
            info!("No new IPs this run, list and repository left unchanged");
            Ok(RunSummary {
                found,
                total: previous_total,
                ..RunSummary::new(settings, RunStatus::NoNewIps)
            })
        }
        MergeOutcome::Changed { all, found, added } if settings.dry_run => {
            info!(
                "[DRY-RUN] {} IPs in log, {} new, {} would be listed in {}",
                found,
                added,
                all.len(),
                settings.output.display()
            );
            Ok(RunSummary {
                found,
                added,
                total: all.len(),
                ..RunSummary::new(settings, RunStatus::WouldUpdate)
            })
        }
        MergeOutcome::Changed { all, found, added } => {
            iplist::save(fs, &settings.output, &all)?;
            info!(
                "Found {} IPs in log, {} new. Total in file: {}",
                found,
                added,
                all.len()
            );

            let message = commit_message(added, now);
            let (published, publish_error) =
                match publisher.publish(&publish_path(&settings.output), &message) {
                    Ok(()) => (true, None),
                    Err(e) => {
                        error!("Failed to publish {}: {:#}", settings.output.display(), e);
                        (false, Some(format!("{:#}", e)))
                    }
                };

            Ok(RunSummary {
                found,
                added,
                total: all.len(),
                commit_message: Some(message),
                published: Some(published),
                publish_error,
                ..RunSummary::new(settings, RunStatus::Updated)
            })
        }
    }
}
