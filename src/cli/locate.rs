//! Print which build file makepick would use.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::common::{LocationArgs, OutputFormat};
use crate::buildfile::{Dialect, search_candidates};
use crate::config::MakepickConfig;

/// Command to show the resolved build file.
#[derive(Args, Debug)]
pub struct LocateCommand {
    #[command(flatten)]
    location: LocationArgs,

    /// Print every candidate path in search order before the result
    #[arg(long)]
    candidates: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct LocateOutput {
    file: String,
    dialect: Dialect,
    directory: String,
}

impl LocateCommand {
    /// Resolve the build file and print its path and dialect.
    pub fn execute(self, config: &MakepickConfig) -> Result<()> {
        if self.candidates {
            let base_dir = self.location.base_dir()?;
            for candidate in search_candidates(&base_dir, &self.location.search_dirs(config)?) {
                eprintln!("  {}", candidate.display());
            }
        }

        let build_file = self.location.locate(config)?;

        match self.format {
            OutputFormat::Json => {
                let output = LocateOutput {
                    file: build_file.path.display().to_string(),
                    dialect: build_file.dialect,
                    directory: build_file.directory().display().to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("{} ({})", build_file.path.display(), build_file.dialect);
            }
        }

        Ok(())
    }
}
