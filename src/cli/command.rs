//! Print the shell command that builds the given targets.
//!
//! ```bash
//! makepick command all                # make -C /work/proj -f Makefile -j8 all
//! makepick command app tests --nice 10
//! ```
//!
//! Every requested target must be declared by the located build file, so a
//! typo fails here rather than in the build.

use anyhow::Result;
use clap::Args;

use super::common::{ExtractionArgs, LocationArgs, fetch_targets};
use crate::buildfile::Dialect;
use crate::cache::TargetCache;
use crate::config::MakepickConfig;
use crate::core::{ErrorContext, IntoAnyhowWithContext, MakepickError};
use crate::invocation::BuildInvocation;

/// Command to format a build invocation.
#[derive(Args, Debug)]
pub struct InvocationCommand {
    /// Targets to build
    #[arg(required = true, value_name = "TARGET")]
    targets: Vec<String>,

    #[command(flatten)]
    location: LocationArgs,

    #[command(flatten)]
    extraction: ExtractionArgs,

    /// Parallel jobs (0 leaves the tool's default)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Run under `nice -n N`
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    nice: Option<i32>,
}

impl InvocationCommand {
    /// Validate the targets and print the command line.
    pub async fn execute(self, mut config: MakepickConfig, cache: &TargetCache) -> Result<()> {
        self.extraction.apply_to(&mut config);
        let build_file = self.location.locate(&config)?;
        let available = fetch_targets(&build_file, &config, cache).await?;

        if let Some(missing) = self.targets.iter().find(|target| !available.contains(target)) {
            let error = MakepickError::UnknownTarget {
                target: missing.clone(),
                file: build_file.path.display().to_string(),
            };
            let context = ErrorContext::new(error.clone())
                .with_details(available_summary(&available))
                .with_suggestion("Run 'makepick list' to see the available targets");
            return Err(error.into_anyhow_with_context(context));
        }

        let executable = match build_file.dialect {
            Dialect::Make => config.make_executable.clone(),
            Dialect::Ninja => config.ninja_executable.clone(),
        };
        let directory = std::path::absolute(build_file.directory())
            .unwrap_or_else(|_| build_file.directory().to_path_buf());

        let file_name =
            build_file.path.file_name().map(|name| name.to_string_lossy().into_owned());

        let invocation = BuildInvocation::new(executable, directory)
            .with_build_file(file_name)
            .with_targets(self.targets)
            .with_jobs(Some(self.jobs.unwrap_or_else(|| config.job_count())))
            .with_nice(self.nice.unwrap_or(config.nice));

        tracing::debug!("Invocation: {:?}", invocation.argv());
        println!("{}", invocation.to_command_line()?);
        Ok(())
    }
}

const SUMMARY_LIMIT: usize = 10;

fn available_summary(available: &[String]) -> String {
    if available.is_empty() {
        return "The build file declares no targets".to_string();
    }

    let shown = available.iter().take(SUMMARY_LIMIT).map(String::as_str).collect::<Vec<_>>();
    let more = available.len().saturating_sub(SUMMARY_LIMIT);
    if more == 0 {
        format!("Available: {}", shown.join(", "))
    } else {
        format!("Available: {} (and {more} more)", shown.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_summary() {
        assert_eq!(available_summary(&[]), "The build file declares no targets");

        let few = vec!["all".to_string(), "test".to_string()];
        assert_eq!(available_summary(&few), "Available: all, test");

        let many: Vec<String> = (0..13).map(|i| format!("t{i}")).collect();
        assert!(available_summary(&many).ends_with("t9 (and 3 more)"));
    }
}
