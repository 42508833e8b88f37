//! Command-line interface for samcheck.
//!
//! # Commands
//!
//! - `check` - Analyse an application template for concurrency bottlenecks
//!   and estimate its monthly cost
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all log output
//! - `--config` - Use a custom global configuration file
//!
//! # Examples
//!
//! ```bash
//! samcheck check
//! samcheck check --template app/template.yaml --region eu-west-1
//! samcheck --quiet check --answers answers.yaml --format json
//! ```

mod check;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use check::CheckCommand;

/// Runtime settings derived from the global CLI flags.
///
/// Kept separate from [`Cli`] so tests and embedders can run commands with a
/// configuration of their own.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for this crate's logs. `None` turns logging off.
    ///
    /// Ignored when `RUST_LOG` is set.
    pub log_level: Option<String>,

    /// Custom path to the global configuration file.
    ///
    /// When `None`, `~/.samcheck/config.toml` is used.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Configuration with logging off and the default config location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// Logs go to stderr so that stdout only carries results. Calling this
    /// more than once is harmless: later calls keep the first subscriber.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            match &self.log_level {
                Some(level) => EnvFilter::new(format!("samcheck_cli={level}")),
                None => EnvFilter::new("off"),
            }
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Bottleneck and cost analysis for serverless application templates.
#[derive(Parser, Debug)]
#[command(
    name = "samcheck",
    about = "Bottleneck and cost analysis for serverless application templates",
    version,
    long_about = None
)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a template for bottlenecks and estimate its cost
    Check(CheckCommand),
}

impl Cli {
    /// Run the parsed command.
    ///
    /// # Errors
    ///
    /// Any error from the command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// [`CliConfig`] for the parsed global flags.
    ///
    /// `--verbose` selects debug, `--quiet` turns logging off, and the default
    /// is info.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Run the parsed command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Any error from the command.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Check(cmd) => cmd.execute_with_config(config.config_path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_log_levels() {
        let cli = Cli::parse_from(["samcheck", "--verbose", "check"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));

        let cli = Cli::parse_from(["samcheck", "check", "--quiet"]);
        assert_eq!(cli.build_config().log_level, None);

        let cli = Cli::parse_from(["samcheck", "check"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["samcheck", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn test_config_path_passed_through() {
        let cli = Cli::parse_from(["samcheck", "--config", "/tmp/samcheck.toml", "check"]);
        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("/tmp/samcheck.toml")));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
