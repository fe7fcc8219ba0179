//! Test utilities for makepick
//!
//! Helpers shared by unit and integration tests: one-time logging setup and
//! fake `make`/`ninja` executables that print canned output.
//!
//! # Example
//!
//! ```rust,no_run
//! use makepick_cli::test_utils::{FakeTool, init_test_logging};
//!
//! init_test_logging(None);
//! let dir = tempfile::TempDir::new().unwrap();
//! let ninja = FakeTool::new(dir.path(), "ninja").stdout("all: phony\n").install().unwrap();
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, nothing is
/// installed. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=cache=debug,tool=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true) // Show targets like "tool" and "cache"
            .with_thread_ids(false)
            .try_init();
    });
}

/// A shell script standing in for a build tool.
///
/// The script ignores its arguments, prints the configured stdout and exits
/// with the configured status. Unix only.
#[derive(Debug, Clone)]
pub struct FakeTool {
    path: PathBuf,
    stdout: String,
    exit_code: i32,
}

impl FakeTool {
    /// Fake tool named `name` inside `dir`.
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            path: dir.join(name),
            stdout: String::new(),
            exit_code: 0,
        }
    }

    /// Text printed on stdout
    #[must_use]
    pub fn stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Exit status
    #[must_use]
    pub const fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Write the script, mark it executable and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be written.
    pub fn install(self) -> io::Result<PathBuf> {
        let script = format!(
            "#!/bin/sh\ncat <<'MAKEPICK_FAKE_EOF'\n{}\nMAKEPICK_FAKE_EOF\nexit {}\n",
            self.stdout.trim_end_matches('\n'),
            self.exit_code
        );
        std::fs::write(&self.path, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o755))?;
        }

        Ok(self.path)
    }
}
