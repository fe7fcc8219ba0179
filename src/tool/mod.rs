//! External build-tool invocation.
//!
//! The subprocess extraction strategies run `make` and `ninja` through
//! [`ToolCommand`]. [`ToolPaths`] carries the configured executable names so a
//! strategy can be selected once and reused.

pub mod command_builder;

pub use command_builder::{ToolCommand, ToolOutput};

use std::path::PathBuf;

use crate::constants::{DEFAULT_MAKE_EXECUTABLE, DEFAULT_NINJA_EXECUTABLE};

/// Executable names (or paths) for the supported build tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Make executable, `make` by default
    pub make: String,
    /// Ninja executable, `ninja` by default
    pub ninja: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            make: DEFAULT_MAKE_EXECUTABLE.to_string(),
            ninja: DEFAULT_NINJA_EXECUTABLE.to_string(),
        }
    }
}

impl ToolPaths {
    /// Override the Make executable
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = make.into();
        self
    }

    /// Override the Ninja executable
    pub fn with_ninja(mut self, ninja: impl Into<String>) -> Self {
        self.ninja = ninja.into();
        self
    }
}

/// Resolves a command to the executable that would run, if any.
#[must_use]
pub fn resolve_executable(cmd: &str) -> Option<PathBuf> {
    which::which(cmd).ok()
}
