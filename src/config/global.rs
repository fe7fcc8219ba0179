//! Global configuration for makepick.
//!
//! Stored at `~/.makepick/config.toml` (`%LOCALAPPDATA%\makepick\config.toml`
//! on Windows). Every key is optional; a missing file means defaults.
//!
//! ```toml
//! make_executable = "gmake"
//! ninja_executable = "ninja"
//! cache_targets = true
//! sort_targets = false
//! list_method = "qp"
//! build_dir = "~/builds/myproject"
//! extra_dirs = ["build", "out"]
//! jobs = 8
//! nice = 10
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::buildfile::SearchDirs;
use crate::cache::CachePolicy;
use crate::constants::{
    DEFAULT_BUILD_SUBDIR, DEFAULT_MAKE_EXECUTABLE, DEFAULT_NINJA_EXECUTABLE, FALLBACK_JOB_COUNT,
};
use crate::core::MakepickError;
use crate::extract::ExtractionMethod;
use crate::tool::ToolPaths;

fn default_make_executable() -> String {
    DEFAULT_MAKE_EXECUTABLE.to_string()
}

fn default_ninja_executable() -> String {
    DEFAULT_NINJA_EXECUTABLE.to_string()
}

const fn default_true() -> bool {
    true
}

fn default_extra_dirs() -> Vec<String> {
    vec![DEFAULT_BUILD_SUBDIR.to_string()]
}

/// User-wide makepick settings.
///
/// Command-line flags take precedence over these values; the CLI applies
/// them on top of a loaded config before building a [`CachePolicy`],
/// [`ToolPaths`] or search order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakepickConfig {
    /// Make executable name or path
    #[serde(default = "default_make_executable")]
    pub make_executable: String,

    /// Ninja executable name or path
    #[serde(default = "default_ninja_executable")]
    pub ninja_executable: String,

    /// Reuse target lists while the build file is unchanged
    #[serde(default = "default_true")]
    pub cache_targets: bool,

    /// Sort target lists
    #[serde(default)]
    pub sort_targets: bool,

    /// How Makefile targets are listed
    #[serde(default)]
    pub list_method: ExtractionMethod,

    /// Out-of-tree build directory searched before the base directory.
    ///
    /// `~` and `$VAR` references are expanded; relative paths are taken
    /// relative to the base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<String>,

    /// Directories searched after the base directory
    #[serde(default = "default_extra_dirs")]
    pub extra_dirs: Vec<String>,

    /// Parallel jobs for generated commands (default: available parallelism)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Niceness prefix for generated commands (0 = none)
    #[serde(default)]
    pub nice: i32,
}

impl Default for MakepickConfig {
    fn default() -> Self {
        Self {
            make_executable: default_make_executable(),
            ninja_executable: default_ninja_executable(),
            cache_targets: true,
            sort_targets: false,
            list_method: ExtractionMethod::Default,
            build_dir: None,
            extra_dirs: default_extra_dirs(),
            jobs: None,
            nice: 0,
        }
    }
}

impl MakepickConfig {
    /// Load from the default location, or defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_with_optional(Some(path)).await
    }

    /// Load from `path` when given, the default location otherwise.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// does not match the expected schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(MakepickError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Platform default config file path.
    ///
    /// - **Windows**: `%LOCALAPPDATA%\makepick\config.toml`
    /// - **Unix/macOS**: `~/.makepick/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("makepick")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".makepick")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Starter configuration written by `makepick config init`.
    #[must_use]
    pub fn init_example() -> Self {
        Self {
            extra_dirs: vec![DEFAULT_BUILD_SUBDIR.to_string(), "out".to_string()],
            jobs: Some(FALLBACK_JOB_COUNT),
            ..Self::default()
        }
    }

    /// Executables for the extraction strategies.
    #[must_use]
    pub fn tool_paths(&self) -> ToolPaths {
        ToolPaths::default()
            .with_make(self.make_executable.clone())
            .with_ninja(self.ninja_executable.clone())
    }

    /// Caching and sorting switches.
    #[must_use]
    pub const fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            caching: self.cache_targets,
            sort: self.sort_targets,
        }
    }

    /// `build_dir` with `~` and environment variables expanded.
    ///
    /// # Errors
    ///
    /// Returns [`MakepickError::ConfigError`] when a referenced variable is
    /// undefined.
    pub fn expanded_build_dir(&self) -> Result<Option<PathBuf>, MakepickError> {
        self.build_dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .map(|dir| {
                shellexpand::full(dir).map(|expanded| PathBuf::from(expanded.as_ref())).map_err(
                    |e| MakepickError::ConfigError {
                        message: format!("Cannot expand build_dir '{dir}': {e}"),
                    },
                )
            })
            .transpose()
    }

    /// Directory search order: build dir, the base directory, `extra_dirs`.
    ///
    /// `build_dir_override` replaces the configured `build_dir` and is used
    /// as given, without expansion.
    ///
    /// # Errors
    ///
    /// Propagates [`expanded_build_dir`](Self::expanded_build_dir) failures
    /// when no override is given.
    pub fn search_dirs(
        &self,
        build_dir_override: Option<PathBuf>,
    ) -> Result<Vec<PathBuf>, MakepickError> {
        let build_dir = match build_dir_override {
            Some(dir) => Some(dir),
            None => self.expanded_build_dir()?,
        };

        Ok(SearchDirs::new()
            .with_build_dir(build_dir)
            .with_extra(self.extra_dirs.iter().map(PathBuf::from))
            .into_dirs())
    }

    /// Job count for generated commands.
    #[must_use]
    pub fn job_count(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(FALLBACK_JOB_COUNT, std::num::NonZero::get)
        })
    }
}
