//! Argument groups and helpers shared by CLI commands

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::buildfile::{self, BuildFile};
use crate::cache::{CachePolicy, TargetCache};
use crate::config::MakepickConfig;
use crate::core::MakepickError;
use crate::extract::{ExtractionMethod, ExtractionStrategy};

/// Where to look for the build file.
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Directory to search from (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Search from the enclosing project root (.git, .hg, .svn or .projectile)
    #[arg(short, long)]
    pub project: bool,

    /// Build directory searched first (overrides `build_dir` in the config)
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,
}

impl LocationArgs {
    /// The directory the search starts from.
    ///
    /// # Errors
    ///
    /// Fails when the current directory is unavailable, or `--project` was
    /// given and no project marker exists above the start directory.
    pub fn base_dir(&self) -> Result<PathBuf> {
        let start = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        if !self.project {
            return Ok(start);
        }

        let start = std::path::absolute(&start).unwrap_or(start);
        buildfile::find_project_root(&start).ok_or_else(|| {
            MakepickError::ProjectRootNotFound {
                start: start.display().to_string(),
            }
            .into()
        })
    }

    /// Search directories: the command-line build dir wins over the config's.
    ///
    /// # Errors
    ///
    /// Fails when the configured `build_dir` cannot be expanded.
    pub fn search_dirs(&self, config: &MakepickConfig) -> Result<Vec<PathBuf>> {
        Ok(config.search_dirs(self.build_dir.clone())?)
    }

    /// Locate the build file.
    ///
    /// # Errors
    ///
    /// Returns [`MakepickError::BuildFileNotFound`] when no candidate exists.
    pub fn locate(&self, config: &MakepickConfig) -> Result<BuildFile> {
        let base_dir = self.base_dir()?;
        let dirs = self.search_dirs(config)?;
        Ok(buildfile::locate_required(&base_dir, &dirs)?)
    }
}

/// How targets are extracted and presented.
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractionArgs {
    /// Makefile listing method: "default" (scan the file) or "qp" (ask make)
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<ExtractionMethod>,

    /// Sort targets alphabetically
    #[arg(short, long)]
    pub sort: bool,

    /// Make executable
    #[arg(long, value_name = "EXE")]
    pub make: Option<String>,

    /// Ninja executable
    #[arg(long, value_name = "EXE")]
    pub ninja: Option<String>,
}

impl ExtractionArgs {
    /// Apply the flags on top of a loaded configuration.
    pub fn apply_to(&self, config: &mut MakepickConfig) {
        if let Some(method) = self.method {
            config.list_method = method;
        }
        if self.sort {
            config.sort_targets = true;
        }
        if let Some(make) = &self.make {
            config.make_executable.clone_from(make);
        }
        if let Some(ninja) = &self.ninja {
            config.ninja_executable.clone_from(ninja);
        }
    }
}

/// Output format for commands that print results.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text, one item per line
    #[default]
    Text,
    /// JSON object
    Json,
}

/// Extract the targets of `build_file` through `cache` using `config`.
///
/// # Errors
///
/// Propagates extraction failures.
pub async fn fetch_targets(
    build_file: &BuildFile,
    config: &MakepickConfig,
    cache: &TargetCache,
) -> Result<Vec<String>> {
    let strategy =
        ExtractionStrategy::select(build_file.dialect, config.list_method, &config.tool_paths());
    let policy: CachePolicy = config.cache_policy();

    cache.get_targets(&build_file.path, &strategy, policy).await
}
