//! Shell command lines for building chosen targets.
//!
//! Both make and ninja accept `-C <dir>`, `-f <file>` and `-j<N>`, so one
//! shape covers either dialect:
//!
//! ```text
//! [nice -n N ]<tool> -C <dir> [-f <file>] [-j<N>] <target>...
//! ```
//!
//! `-f` names the file the targets were read from. Make's own lookup order
//! (`GNUmakefile`, `makefile`, `Makefile`) differs from the locator's, so
//! leaving it out can build from a different file.

use std::path::PathBuf;

use crate::core::MakepickError;

/// A build-tool invocation for one or more targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    /// make or ninja executable
    pub executable: String,
    /// Directory holding the build file, passed with `-C`
    pub directory: PathBuf,
    /// Build file name relative to `directory`, passed with `-f`
    pub build_file: Option<String>,
    /// Targets to build, in the order given
    pub targets: Vec<String>,
    /// Parallel jobs; `None` or 0 leaves the tool's default
    pub jobs: Option<usize>,
    /// Niceness; 0 runs without `nice`
    pub nice: i32,
}

impl BuildInvocation {
    /// Invocation of `executable` in `directory` with no targets yet.
    pub fn new(executable: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            directory: directory.into(),
            build_file: None,
            targets: Vec::new(),
            jobs: None,
            nice: 0,
        }
    }

    /// Set the build file passed with `-f`
    #[must_use]
    pub fn with_build_file(mut self, build_file: Option<String>) -> Self {
        self.build_file = build_file;
        self
    }

    /// Set the targets
    #[must_use]
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Set the job count
    #[must_use]
    pub const fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set the niceness
    #[must_use]
    pub const fn with_nice(mut self, nice: i32) -> Self {
        self.nice = nice;
        self
    }

    /// Unquoted argument vector, starting with the program to run.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.targets.len() + 9);
        if self.nice != 0 {
            argv.extend(["nice".to_string(), "-n".to_string(), self.nice.to_string()]);
        }
        argv.push(self.executable.clone());
        argv.push("-C".to_string());
        argv.push(self.directory.display().to_string());
        if let Some(build_file) = &self.build_file {
            argv.push("-f".to_string());
            argv.push(build_file.clone());
        }
        if let Some(jobs) = self.jobs.filter(|&jobs| jobs > 0) {
            argv.push(format!("-j{jobs}"));
        }
        argv.extend(self.targets.iter().cloned());
        argv
    }

    /// The invocation as one shell-quoted line.
    ///
    /// # Errors
    ///
    /// Fails when an argument contains a NUL byte, which no shell can quote.
    pub fn to_command_line(&self) -> Result<String, MakepickError> {
        let argv = self.argv();
        shlex::try_join(argv.iter().map(String::as_str)).map_err(|e| MakepickError::Other {
            message: format!("Cannot quote command line for {}: {e}", self.executable),
        })
    }
}
