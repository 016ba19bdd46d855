//! # post405 - collect clients behind 405 POST responses
//!
//! Scans an nginx proxy manager access log for `405 - POST` requests, merges
//! the client IPs into a persisted list and, when the list grew, commits and
//! pushes it with git.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ iplist::load │   │  extractor   │   independent leaves
//! └──────┬───────┘   └──────┬───────┘
//!        └────────┬─────────┘
//!          ┌──────▼──────┐
//!          │    merge    │   nothing found / no new IPs -> stop
//!          └──────┬──────┘
//!          ┌──────▼──────┐
//!          │ iplist::save│   numeric order, atomic replace
//!          └──────┬──────┘
//!          ┌──────▼──────┐
//!          │  publisher  │   git add, commit, push
//!          └─────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use chrono::Utc;
//! use post405::cmd_abstraction::RealCommandExecutor;
//! use post405::config::Settings;
//! use post405::fs_abstraction::real_fs;
//! use post405::publisher::GitPublisher;
//! use post405::{pipeline, Cli};
//! use clap::Parser;
//!
//! fn main() -> anyhow::Result<()> {
//!     let cli = Cli::parse();
//!     let settings = Settings::from_cli(&cli)?;
//!     let publisher = GitPublisher::new(RealCommandExecutor::new(), settings.git.clone());
//!     let summary = pipeline::run(&settings, real_fs(), &publisher, Utc::now())?;
//!     println!("{} new IPs", summary.added);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definition
//! - [`cmd_abstraction`] - Command execution trait (git runs through it)
//! - [`config`] - Optional YAML config and effective settings
//! - [`error`] - Domain error type
//! - [`extractor`] - Client IP extraction from log lines
//! - [`fs_abstraction`] - Filesystem trait
//! - [`iplist`] - Loading, ordering and saving the IP list
//! - [`merge`] - Union and change detection
//! - [`pipeline`] - One complete run
//! - [`publisher`] - Publishing via git

pub mod cli;
pub mod cmd_abstraction;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fs_abstraction;
pub mod iplist;
pub mod merge;
pub mod pipeline;
pub mod publisher;

pub use cli::Cli;
pub use config::{Config, Settings};
pub use error::Post405Error;
