//! Static Makefile scanning.
//!
//! Reads the Makefile text and takes every `name:` at the start of a line,
//! skipping names that begin with `.` (special targets like `.PHONY` and
//! `.SUFFIXES`). Nothing is executed, so included files and generated rules
//! are not seen; use the `qp` method when those matter.

use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::core::MakepickError;

static RULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^: \n]+):").expect("rule line pattern is valid"));

/// Strategy that scans the Makefile text directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticStrategy;

impl StaticStrategy {
    /// Read `build_file` and scan it for targets.
    pub async fn extract(&self, build_file: &Path) -> Result<Vec<String>> {
        let bytes = tokio::fs::read(build_file).await.map_err(|e| MakepickError::UnreadableFile {
            path: build_file.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(scan_makefile(&String::from_utf8_lossy(&bytes)))
    }
}

/// Targets declared at the start of a line, in file order.
///
/// Repeated names are kept; [`super::dedup_targets`] removes them.
#[must_use]
pub fn scan_makefile(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| RULE_LINE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .filter(|name| !name.starts_with('.'))
        .map(String::from)
        .collect()
}
