//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "post405")]
#[command(
    author,
    version,
    about = "Collect client IPs of 405 POST responses from a proxy log and publish the list via git"
)]
pub struct Cli {
    /// nginx proxy manager access log to scan
    pub logfile: PathBuf,

    /// File holding the IP list [default: clients_405_post.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Local git repository to commit and push from [default: .]
    #[arg(long)]
    pub repo: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Remote to push to (plain `git push` when unset)
    #[arg(long)]
    pub remote: Option<String>,

    /// Branch to push, requires --remote
    #[arg(long)]
    pub branch: Option<String>,

    /// Commit but do not push
    #[arg(long)]
    pub no_push: bool,

    /// Report what would change without writing or committing
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON summary of the run on stdout
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (for cron)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_logfile_required() {
        assert!(Cli::try_parse_from(["post405"]).is_err());
    }

    #[test]
    fn test_short_and_long_output() {
        let cli = Cli::try_parse_from(["post405", "a.log", "-o", "x.txt"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("x.txt")));
        let cli = Cli::try_parse_from(["post405", "a.log", "--output", "y.txt"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("y.txt")));
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["post405", "a.log", "-q", "-v"]).is_err());
    }
}
