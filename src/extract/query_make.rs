//! Make rule-database extraction (`make -nqp`).
//!
//! GNU make prints its whole database with `-p`. Only the `# Files` section
//! lists explicit targets; everything before it is variables, directories and
//! implicit rules. Within that section a target is a line of the form
//! `name:` unless make annotated it with a preceding `# Not a target:` line.

use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::working_dir;
use crate::core::MakepickError;
use crate::tool::ToolCommand;

const FILES_MARKER: &str = "# Files";
const NOT_A_TARGET: &str = "# Not a target:";

static TARGET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^%$:#\t\n ]+):").expect("database target pattern is valid"));

// Dot-files, optionally below a directory prefix (`.o`, `src/.deps`)
static HIDDEN_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([/a-zA-Z0-9_. -]+/)?\.").expect("hidden target pattern is valid"));

/// Strategy that queries make for its rule database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMakeStrategy {
    make: String,
}

impl QueryMakeStrategy {
    /// Strategy using the given make executable.
    pub fn new(make: impl Into<String>) -> Self {
        Self {
            make: make.into(),
        }
    }

    /// Dump the database for `build_file` and parse the explicit targets.
    ///
    /// make's exit status is ignored (`-q` is non-zero whenever something is
    /// out of date); a dump without a `# Files` section is an error.
    pub async fn extract(&self, build_file: &Path) -> Result<Vec<String>> {
        let output = ToolCommand::make_database(&self.make, build_file)
            .current_dir(working_dir(build_file))
            .with_context(build_file.display().to_string())
            .execute()
            .await?;

        parse_make_database(&output.stdout).ok_or_else(|| {
            tracing::debug!(
                target: "extract",
                "No '{}' section in {} output ({} bytes)",
                FILES_MARKER,
                self.make,
                output.stdout.len()
            );
            MakepickError::UnexpectedOutputFormat {
                tool: self.make.clone(),
                file: build_file.display().to_string(),
            }
            .into()
        })
    }
}

/// Explicit targets from a `make -p` database dump, in dump order.
///
/// Returns `None` when the dump has no `# Files` section.
#[must_use]
pub fn parse_make_database(output: &str) -> Option<Vec<String>> {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.iter().position(|line| line.starts_with(FILES_MARKER))?;

    let mut targets = Vec::new();
    for index in (start + 1)..lines.len() {
        let Some(name) = TARGET_LINE.captures(lines[index]).and_then(|caps| caps.get(1)) else {
            continue;
        };
        if lines[index - 1].starts_with(NOT_A_TARGET) {
            continue;
        }
        let name = name.as_str();
        if HIDDEN_TARGET.is_match(name) {
            continue;
        }
        targets.push(name.to_string());
    }

    Some(targets)
}
