//! Command-line interface for makepick.
//!
//! # Commands
//!
//! - `list` - List the targets of the nearest Makefile or build.ninja
//! - `locate` - Show which build file would be used
//! - `command` - Print the shell command that builds chosen targets
//! - `config` - Manage the configuration file
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a config file (also `MAKEPICK_CONFIG`)
//!
//! # Example
//!
//! ```bash
//! makepick list --sort
//! makepick command all --jobs 8
//! RUST_LOG=cache=debug makepick list
//! ```

mod command;
pub mod common;
mod config;
mod list;
mod locate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::cache::TargetCache;
use crate::config::MakepickConfig;
use crate::constants::CONFIG_PATH_ENV;

/// Logging settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub log_level: String,

    /// Explicit config file path
    pub config_path: Option<PathBuf>,
}

/// Main CLI structure for makepick.
#[derive(Parser, Debug)]
#[command(
    name = "makepick",
    about = "List and pick Make and Ninja build targets",
    version,
    long_about = "makepick finds the nearest Makefile or build.ninja, lists its targets \
                  (cached until the file changes) and formats build commands for them."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = CONFIG_PATH_ENV, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the targets of the nearest build file
    List(list::ListCommand),

    /// Show which build file would be used
    Locate(locate::LocateCommand),

    /// Print the command that builds the given targets
    Command(command::InvocationCommand),

    /// Manage the configuration file
    Config(config::ConfigCommand),
}

impl Cli {
    /// Set up logging, load the configuration and run the command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` turns it into a user-facing message.
    pub async fn execute(self) -> Result<()> {
        let cli_config = self.build_config();
        init_logging(&cli_config);
        self.execute_with_config(cli_config).await
    }

    /// Logging level and config path from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Run the command without touching the global logger.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub async fn execute_with_config(self, cli_config: CliConfig) -> Result<()> {
        let config_path = cli_config.config_path;
        let cache = TargetCache::new();

        match self.command {
            Commands::List(cmd) => {
                let config = MakepickConfig::load_with_optional(config_path).await?;
                cmd.execute(config, &cache).await
            }
            Commands::Locate(cmd) => {
                let config = MakepickConfig::load_with_optional(config_path).await?;
                cmd.execute(&config)
            }
            Commands::Command(cmd) => {
                let config = MakepickConfig::load_with_optional(config_path).await?;
                cmd.execute(config, &cache).await
            }
            Commands::Config(cmd) => cmd.execute(config_path).await,
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the flag-derived level.
fn init_logging(cli_config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli_config.log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}
