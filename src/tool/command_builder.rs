//! Type-safe builder for running external build tools
//!
//! This module provides a fluent API for building and executing `make` and
//! `ninja` invocations with consistent logging and error mapping.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::SLOW_TOOL_THRESHOLD_SECS;
use crate::core::MakepickError;

/// Builder for constructing and executing build-tool commands.
///
/// A spawn failure caused by a missing executable becomes
/// [`MakepickError::ToolNotFound`]; a non-zero exit becomes
/// [`MakepickError::ToolCommandError`] unless [`allow_failure`](Self::allow_failure)
/// was set.
///
/// # Examples
///
/// ```rust,no_run
/// use makepick_cli::tool::ToolCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = ToolCommand::new("ninja")
///     .args(["-f", "build.ninja", "-t", "targets", "all"])
///     .current_dir("/path/to/build")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
///
/// # Default Configuration
///
/// - **Timeout**: none, the command runs until the tool exits
/// - **Output capture**: stdout and stderr are both captured
/// - **Exit status**: non-zero is an error
/// - **Working directory**: current process directory
pub struct ToolCommand {
    /// Executable name or path (e.g. "make", "/usr/bin/ninja")
    program: String,

    /// Arguments passed to the executable
    args: Vec<String>,

    /// Working directory for command execution
    current_dir: Option<PathBuf>,

    /// Environment variables to set for the process
    env_vars: Vec<(String, String)>,

    /// Send stderr to the null device instead of capturing it
    discard_stderr: bool,

    /// Accept non-zero exit codes and return the captured output anyway
    allow_failure: bool,

    /// Maximum duration to wait for the command (None = wait forever)
    timeout_duration: Option<Duration>,

    /// Human-readable operation name used in errors (defaults to the first argument)
    operation: Option<String>,

    /// Optional context string for log messages
    context: Option<String>,
}

impl ToolCommand {
    /// Creates a new command for the given executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env_vars: Vec::new(),
            discard_stderr: false,
            allow_failure: false,
            timeout_duration: None,
            operation: None,
            context: None,
        }
    }

    /// Sets the working directory for the command.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an environment variable for the process.
    ///
    /// Useful for pinning `LC_ALL=C` so tool output is parsed in a stable locale.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Discards the tool's stderr instead of capturing it.
    pub const fn discard_stderr(mut self) -> Self {
        self.discard_stderr = true;
        self
    }

    /// Returns captured output even when the tool exits with a non-zero status.
    ///
    /// `make -q` reports "targets out of date" through its exit status, so
    /// callers parsing its database dump have to look at the output regardless.
    pub const fn allow_failure(mut self) -> Self {
        self.allow_failure = true;
        self
    }

    /// Set a timeout for the command (None for no timeout)
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Names the operation for error messages (e.g. "-t targets").
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Set a context for logging (e.g., the build file being queried)
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn operation_name(&self) -> String {
        self.operation
            .clone()
            .or_else(|| self.args.first().cloned())
            .unwrap_or_else(|| "invocation".to_string())
    }

    fn log_prefix(&self) -> String {
        self.context.as_ref().map(|ctx| format!("({ctx}) ")).unwrap_or_default()
    }

    /// Execute the command and return its output
    pub async fn execute(self) -> Result<ToolOutput> {
        let start = Instant::now();
        let prefix = self.log_prefix();
        let command_line = format!("{} {}", self.program, self.args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            target: "tool",
            "{}Executing command: {} (in {})",
            prefix,
            command_line,
            self.current_dir
                .as_deref()
                .map_or_else(|| ".".to_string(), |d| d.display().to_string())
        );

        for (key, value) in &self.env_vars {
            tracing::trace!(target: "tool", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        if self.discard_stderr {
            cmd.stderr(Stdio::null());
        } else {
            cmd.stderr(Stdio::piped());
        }
        cmd.kill_on_drop(true);

        let output_future = cmd.output();

        let output_result = if let Some(duration) = self.timeout_duration {
            if let Ok(result) = timeout(duration, output_future).await {
                result
            } else {
                tracing::warn!(
                    target: "tool",
                    "{}Command timed out after {} seconds: {}",
                    prefix,
                    duration.as_secs(),
                    command_line
                );
                return Err(MakepickError::ToolCommandError {
                    tool: self.program.clone(),
                    operation: self.operation_name(),
                    stderr: format!("Timed out after {} seconds", duration.as_secs()),
                }
                .into());
            }
        } else {
            output_future.await
        };

        let output = match output_result {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(target: "tool", "{}Executable not found: {}", prefix, self.program);
                return Err(MakepickError::ToolNotFound {
                    tool: self.program.clone(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to execute {command_line}"));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "tool",
                "{}Command exited with code: {:?}",
                prefix,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "tool", "{}Error: {}", prefix, stderr.trim());
            }

            if !self.allow_failure {
                return Err(MakepickError::ToolCommandError {
                    tool: self.program.clone(),
                    operation: self.operation_name(),
                    stderr: if stderr.is_empty() {
                        stdout
                    } else {
                        stderr
                    },
                }
                .into());
            }
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() >= SLOW_TOOL_THRESHOLD_SECS {
            tracing::info!(
                target: "tool::perf",
                "{}{} {} took {:.2}s",
                prefix,
                self.program,
                self.operation_name(),
                elapsed.as_secs_f64()
            );
        } else {
            tracing::debug!(
                target: "tool::perf",
                "{}{} {} took {}ms",
                prefix,
                self.program,
                self.operation_name(),
                elapsed.as_millis()
            );
        }

        Ok(ToolOutput {
            stdout,
            stderr,
            exit_code: output.status.code(),
        })
    }

    /// Execute the command and return only stdout
    pub async fn execute_stdout(self) -> Result<String> {
        let output = self.execute().await?;
        Ok(output.stdout)
    }
}

/// Output from a build-tool command
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error (empty when discarded)
    pub stderr: String,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
}

// Convenience builders for the invocations the extraction strategies need

impl ToolCommand {
    /// `ninja -f <file> -t targets all`: list every target with its rule.
    pub fn ninja_targets(ninja: &str, build_file: &Path) -> Self {
        Self::new(ninja)
            .arg("-f")
            .arg(file_arg(build_file))
            .args(["-t", "targets", "all"])
            .operation("-t targets all")
    }

    /// `make -f <file> -nqp __BASH_MAKE_COMPLETION__=1 .DEFAULT`: dump make's
    /// rule database without running any recipe.
    ///
    /// The completion variable mirrors what bash-completion passes so
    /// Makefiles that special-case it stay quiet.
    pub fn make_database(make: &str, build_file: &Path) -> Self {
        Self::new(make)
            .arg("-f")
            .arg(file_arg(build_file))
            .args(["-nqp", "__BASH_MAKE_COMPLETION__=1", ".DEFAULT"])
            .env("LC_ALL", "C")
            .discard_stderr()
            .allow_failure()
            .operation("-nqp")
    }
}

/// The file argument passed with `-f`: the bare file name, since the command
/// runs from the file's own directory.
fn file_arg(build_file: &Path) -> String {
    build_file
        .file_name()
        .map_or_else(|| build_file.display().to_string(), |name| name.to_string_lossy().into_owned())
}
