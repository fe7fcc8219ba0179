//! Manage the makepick configuration file.
//!
//! ```bash
//! makepick config init          # write a starter config
//! makepick config init --force  # overwrite an existing one
//! makepick config show          # print the effective settings
//! makepick config path          # print where the file lives
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::MakepickConfig;
use crate::tool::resolve_executable;

/// Command to manage the global configuration.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Configuration subcommand (defaults to `show`)
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    /// Run the subcommand against `config_path` (or the default location).
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config_path = match config_path {
            Some(path) => path,
            None => MakepickConfig::default_path()?,
        };

        match self.command {
            Some(ConfigSubcommands::Init { force }) => Self::init(&config_path, force).await,
            Some(ConfigSubcommands::Show) | None => Self::show(&config_path).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", config_path.display());
                Ok(())
            }
        }
    }

    async fn init(config_path: &Path, force: bool) -> Result<()> {
        if config_path.exists() && !force {
            println!("❌ Config already exists at: {}", config_path.display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let config = MakepickConfig::init_example();
        config.save_to(config_path).await?;

        println!("✅ Created config at: {}", config_path.display());
        println!("\n{}", "Example configuration:".bold());
        println!("{}", toml::to_string_pretty(&config)?);
        println!("{}", "Next steps:".yellow());
        println!("  Set make_executable or ninja_executable if the tools are not on PATH");

        Ok(())
    }

    async fn show(config_path: &Path) -> Result<()> {
        let config = MakepickConfig::load_with_optional(Some(config_path.to_path_buf())).await?;

        println!("{}", "Configuration".bold());
        if config_path.exists() {
            println!("Location: {}\n", config_path.display());
        } else {
            println!(
                "Location: {} {}\n",
                config_path.display(),
                "(not created, showing defaults)".dimmed()
            );
        }
        println!("{}", toml::to_string_pretty(&config)?);

        println!("{}", "Tools".bold());
        for tool in [&config.make_executable, &config.ninja_executable] {
            match resolve_executable(tool) {
                Some(path) => println!("  {tool} -> {}", path.display()),
                None => println!("  {tool} -> {}", "not found on PATH".yellow()),
            }
        }

        Ok(())
    }
}
