//! Error handling for makepick
//!
//! This module provides the error types and user-facing error reporting for
//! makepick. The error system is built around two types:
//! - [`MakepickError`] - Enumerated error types for every failure the core can report
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Discovery**: [`MakepickError::BuildFileNotFound`], [`MakepickError::ProjectRootNotFound`]
//! - **Extraction**: [`MakepickError::UnexpectedOutputFormat`], [`MakepickError::UnreadableFile`]
//! - **External tools**: [`MakepickError::ToolNotFound`], [`MakepickError::ToolCommandError`]
//! - **Configuration**: [`MakepickError::ConfigError`], [`MakepickError::InvalidExtractionMethod`]
//!
//! Extraction failures are never cached: the target cache only stores a list
//! after the strategy returned successfully, so a failed call leaves any
//! previous entry in place.
//!
//! # Examples
//!
//! ```rust,no_run
//! use makepick_cli::core::{MakepickError, user_friendly_error};
//!
//! let error = MakepickError::ToolNotFound {
//!     tool: "ninja".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // Colored error with an install suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for makepick operations
///
/// Each variant carries the paths and tool names needed to explain the failure
/// to a user without consulting logs.
#[derive(Error, Debug)]
pub enum MakepickError {
    /// No build-description file exists anywhere in the search space
    ///
    /// This is the host-facing form of the locator's "nothing found" answer.
    /// The locator itself only reports absence; callers decide whether it is
    /// an error.
    #[error("No Makefile or build.ninja found under {base_dir}")]
    BuildFileNotFound {
        /// Base directory the search started from
        base_dir: String,
        /// Directories (relative to `base_dir`) that were searched, in order
        searched: Vec<String>,
    },

    /// No project root marker was found walking up from a directory
    #[error("No project root found above {start}")]
    ProjectRootNotFound {
        /// Directory the upward search started from
        start: String,
    },

    /// The build tool's database dump did not have the expected layout
    ///
    /// Raised by the query-make strategy when the `# Files` marker is missing
    /// from `make -nqp` output. This is a hard failure; an empty target list is
    /// never substituted for it.
    #[error("Unexpected \"{tool} -nqp\" output for {file}")]
    UnexpectedOutputFormat {
        /// Executable that produced the output
        tool: String,
        /// Build file that was being queried
        file: String,
    },

    /// The build tool executable could not be found or started
    #[error("Build tool '{tool}' is not installed or not found in PATH")]
    ToolNotFound {
        /// Executable name or path that failed to start
        tool: String,
    },

    /// The build tool ran but exited abnormally
    #[error("{tool} {operation} failed")]
    ToolCommandError {
        /// Executable that failed
        tool: String,
        /// The operation that was attempted (e.g. "-t targets")
        operation: String,
        /// Error output from the tool
        stderr: String,
    },

    /// The build-description file could not be read
    #[error("Cannot read build file {path}: {reason}")]
    UnreadableFile {
        /// Path of the unreadable file
        path: String,
        /// Reason reported by the operating system
        reason: String,
    },

    /// An unknown target extraction method was configured
    #[error("Unknown target extraction method '{method}' (expected 'default' or 'qp')")]
    InvalidExtractionMethod {
        /// The method string that could not be parsed
        method: String,
    },

    /// A target requested for invocation is not declared by the build file
    #[error("Target '{target}' is not declared in {file}")]
    UnknownTarget {
        /// The requested target name
        target: String,
        /// Build file that was searched
        file: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for MakepickError {
    fn clone(&self) -> Self {
        match self {
            Self::BuildFileNotFound {
                base_dir,
                searched,
            } => Self::BuildFileNotFound {
                base_dir: base_dir.clone(),
                searched: searched.clone(),
            },
            Self::ProjectRootNotFound {
                start,
            } => Self::ProjectRootNotFound {
                start: start.clone(),
            },
            Self::UnexpectedOutputFormat {
                tool,
                file,
            } => Self::UnexpectedOutputFormat {
                tool: tool.clone(),
                file: file.clone(),
            },
            Self::ToolNotFound {
                tool,
            } => Self::ToolNotFound {
                tool: tool.clone(),
            },
            Self::ToolCommandError {
                tool,
                operation,
                stderr,
            } => Self::ToolCommandError {
                tool: tool.clone(),
                operation: operation.clone(),
                stderr: stderr.clone(),
            },
            Self::UnreadableFile {
                path,
                reason,
            } => Self::UnreadableFile {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::InvalidExtractionMethod {
                method,
            } => Self::InvalidExtractionMethod {
                method: method.clone(),
            },
            Self::UnknownTarget {
                target,
                file,
            } => Self::UnknownTarget {
                target: target.clone(),
                file: file.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// ```rust,no_run
/// use makepick_cli::core::{MakepickError, ErrorContext};
///
/// let context = ErrorContext::new(MakepickError::ToolNotFound { tool: "make".into() })
///     .with_suggestion("Install GNU make with your package manager")
///     .with_details("The qp method runs make to dump its rule database");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying makepick error
    pub error: MakepickError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: MakepickError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Extension trait for converting [`MakepickError`] to [`anyhow::Error`] with context
pub trait IntoAnyhowWithContext {
    /// Convert the error to an [`anyhow::Error`] with the provided context
    fn into_anyhow_with_context(self, context: ErrorContext) -> anyhow::Error;
}

impl IntoAnyhowWithContext for MakepickError {
    fn into_anyhow_with_context(self, context: ErrorContext) -> anyhow::Error {
        anyhow::Error::new(ErrorContext {
            error: self,
            suggestion: context.suggestion,
            details: context.details,
        })
    }
}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`MakepickError`] anywhere in the chain, [`ErrorContext`] values
/// that were already built, and [`std::io::Error`]. Anything else is shown
/// with its full context chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    for cause in error.chain() {
        if let Some(makepick_error) = cause.downcast_ref::<MakepickError>() {
            return create_error_context(makepick_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MakepickError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check the permissions of the build directory and its files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MakepickError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut chain = error.chain();
    let message = chain.next().map(ToString::to_string).unwrap_or_default();
    let causes: Vec<String> = chain.map(ToString::to_string).collect();

    let context = ErrorContext::new(MakepickError::Other {
        message,
    });
    if causes.is_empty() {
        context
    } else {
        context.with_details(causes.join("\n  caused by: "))
    }
}

fn create_error_context(error: MakepickError) -> ErrorContext {
    match &error {
        MakepickError::BuildFileNotFound {
            searched,
            ..
        } => {
            let dirs = searched
                .iter()
                .map(|d| if d.is_empty() { "." } else { d.as_str() })
                .collect::<Vec<_>>()
                .join(", ");
            ErrorContext::new(error.clone())
                .with_details(format!(
                    "Looked for Makefile, makefile, GNUmakefile and build.ninja in: {dirs}"
                ))
                .with_suggestion("Run from the directory holding the build file, or pass --dir / --build-dir")
        }
        MakepickError::ProjectRootNotFound {
            ..
        } => ErrorContext::new(error.clone())
            .with_details("Project roots are directories containing .git, .hg, .svn or .projectile")
            .with_suggestion("Drop --project or pass --dir explicitly"),
        MakepickError::UnexpectedOutputFormat {
            tool,
            ..
        } => ErrorContext::new(error.clone())
            .with_details(format!("The '# Files' section was missing from the {tool} database dump"))
            .with_suggestion(
                "Check that the Makefile parses with GNU make, or set list_method = \"default\"",
            ),
        MakepickError::ToolNotFound {
            tool,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Install '{tool}' or point make_executable / ninja_executable at it in the config"
            )),
        MakepickError::ToolCommandError {
            stderr,
            ..
        } => {
            let ctx = ErrorContext::new(error.clone())
                .with_suggestion("Run the command manually in the build directory to see the full output");
            if stderr.trim().is_empty() {
                ctx
            } else {
                ctx.with_details(stderr.trim().to_string())
            }
        }
        MakepickError::UnreadableFile {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check that the build file exists and is readable"),
        MakepickError::InvalidExtractionMethod {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Use --method default or --method qp"),
        MakepickError::UnknownTarget {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Run 'makepick list' to see the available targets"),
        MakepickError::ConfigError {
            ..
        }
        | MakepickError::TomlError(_) => ErrorContext::new(error.clone())
            .with_suggestion("Check the configuration file with 'makepick config show'"),
        _ => ErrorContext::new(error.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MakepickError::ToolNotFound {
            tool: "ninja".to_string(),
        };
        assert_eq!(error.to_string(), "Build tool 'ninja' is not installed or not found in PATH");

        let error = MakepickError::UnexpectedOutputFormat {
            tool: "make".to_string(),
            file: "/tmp/Makefile".to_string(),
        };
        assert_eq!(error.to_string(), "Unexpected \"make -nqp\" output for /tmp/Makefile");

        let error = MakepickError::InvalidExtractionMethod {
            method: "bogus".to_string(),
        };
        assert!(error.to_string().contains("'bogus'"));
    }

    #[test]
    fn test_error_context() {
        let ctx = ErrorContext::new(MakepickError::ToolNotFound {
            tool: "make".to_string(),
        })
        .with_suggestion("Install make")
        .with_details("make is needed for the qp method");

        assert_eq!(ctx.suggestion, Some("Install make".to_string()));
        assert_eq!(ctx.details, Some("make is needed for the qp method".to_string()));

        let display = format!("{ctx}");
        assert!(display.contains("Build tool 'make'"));
        assert!(display.contains("Suggestion: Install make"));
    }

    #[test]
    fn test_clone_converts_toml_error() {
        let toml_error = toml::from_str::<toml::Table>("key = ").unwrap_err();
        let error = MakepickError::from(toml_error);
        match error.clone() {
            MakepickError::Other {
                message,
            } => assert!(message.starts_with("TOML parsing error")),
            other => panic!("unexpected clone result: {other:?}"),
        }
    }

    #[test]
    fn test_user_friendly_build_file_not_found() {
        let error = MakepickError::BuildFileNotFound {
            base_dir: "/work".to_string(),
            searched: vec![String::new(), "build".to_string()],
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));
        let details = ctx.details.unwrap();
        assert!(details.ends_with("in: ., build"));
        assert!(ctx.suggestion.unwrap().contains("--build-dir"));
    }

    #[test]
    fn test_user_friendly_finds_error_behind_context() {
        use anyhow::Context;

        let result: anyhow::Result<()> = Err(MakepickError::ToolNotFound {
            tool: "ninja".to_string(),
        })
        .context("Failed to list targets");
        let ctx = user_friendly_error(result.unwrap_err());
        assert!(matches!(ctx.error, MakepickError::ToolNotFound { .. }));
        assert!(ctx.suggestion.unwrap().contains("ninja_executable"));
    }

    #[test]
    fn test_user_friendly_generic_error_keeps_chain() {
        use anyhow::Context;

        let result: anyhow::Result<()> =
            Err(anyhow::anyhow!("inner problem")).context("outer operation");
        let ctx = user_friendly_error(result.unwrap_err());
        assert_eq!(ctx.error.to_string(), "outer operation");
        assert!(ctx.details.unwrap().contains("inner problem"));
    }

    #[test]
    fn test_tool_command_error_details_from_stderr() {
        let error = MakepickError::ToolCommandError {
            tool: "ninja".to_string(),
            operation: "-t targets".to_string(),
            stderr: "ninja: error: loading 'build.ninja'\n".to_string(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));
        assert_eq!(ctx.details.as_deref(), Some("ninja: error: loading 'build.ninja'"));
    }
}
