//! makepick - build-target discovery for Make and Ninja projects.
//!
//! makepick finds the nearest `Makefile` (or `makefile`, `GNUmakefile`) or
//! `build.ninja`, lists the targets it declares and remembers that list until
//! the file's modification time changes.
//!
//! # Pipeline
//!
//! 1. [`buildfile`] resolves a base directory and search directories to a
//!    [`buildfile::BuildFile`] with its [`buildfile::Dialect`].
//! 2. [`extract`] selects an [`extract::ExtractionStrategy`]: `ninja -t targets`
//!    for Ninja, `make -nqp` or a static scan for Make.
//! 3. [`cache`] serves a stored list or runs the strategy, optionally sorting.
//!
//! ```rust,no_run
//! use makepick_cli::buildfile::locate_required;
//! use makepick_cli::cache::{CachePolicy, TargetCache};
//! use makepick_cli::extract::{ExtractionMethod, ExtractionStrategy};
//! use makepick_cli::tool::ToolPaths;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let build_file = locate_required(Path::new("."), &[PathBuf::new(), PathBuf::from("build")])?;
//! let strategy = ExtractionStrategy::select(
//!     build_file.dialect,
//!     ExtractionMethod::QueryMake,
//!     &ToolPaths::default(),
//! );
//! let cache = TargetCache::new();
//! let targets = cache.get_targets(&build_file.path, &strategy, CachePolicy::default()).await?;
//! # Ok(())
//! # }
//! ```

// Core pipeline
pub mod buildfile;
pub mod cache;
pub mod extract;

// External tools
pub mod invocation;
pub mod tool;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
