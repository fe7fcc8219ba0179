//! List the targets of the nearest build file.
//!
//! ```bash
//! makepick list                    # targets of ./Makefile or ./build/build.ninja
//! makepick list --sort --method qp # ask make, sorted
//! makepick list --project          # start from the project root
//! makepick list --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::{ExtractionArgs, LocationArgs, OutputFormat, fetch_targets};
use crate::buildfile::Dialect;
use crate::cache::TargetCache;
use crate::config::MakepickConfig;

/// Command to list build targets.
#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(flatten)]
    location: LocationArgs,

    #[command(flatten)]
    extraction: ExtractionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    file: String,
    dialect: Dialect,
    targets: &'a [String],
}

impl ListCommand {
    /// Locate the build file, extract its targets and print them.
    pub async fn execute(self, mut config: MakepickConfig, cache: &TargetCache) -> Result<()> {
        self.extraction.apply_to(&mut config);
        let build_file = self.location.locate(&config)?;
        let targets = fetch_targets(&build_file, &config, cache).await?;

        match self.format {
            OutputFormat::Json => {
                let output = ListOutput {
                    file: build_file.path.display().to_string(),
                    dialect: build_file.dialect,
                    targets: &targets,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if targets.is_empty() {
                    eprintln!(
                        "{}",
                        format!("No targets found in {}", build_file.path.display()).yellow()
                    );
                }
                for target in &targets {
                    println!("{target}");
                }
            }
        }

        Ok(())
    }
}
