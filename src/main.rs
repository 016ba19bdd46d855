//! post405 - collect client IPs of 405 POST responses and publish them via git

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use post405::cmd_abstraction::RealCommandExecutor;
use post405::fs_abstraction::real_fs;
use post405::pipeline;
use post405::publisher::GitPublisher;
use post405::{Cli, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // stderr, so --json output on stdout stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::from_cli(&cli)?;
    let publisher = GitPublisher::new(RealCommandExecutor::new(), settings.git.clone());
    let summary = pipeline::run(&settings, real_fs(), &publisher, Utc::now())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
