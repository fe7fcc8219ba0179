//! Target extraction strategies.
//!
//! A build file's targets are obtained with one of three strategies, chosen
//! once from the file's [`Dialect`] and the configured [`ExtractionMethod`]:
//!
//! | Dialect | Method    | Strategy                                   |
//! |---------|-----------|--------------------------------------------|
//! | Ninja   | (ignored) | [`NinjaStrategy`]: `ninja -t targets all`  |
//! | Make    | `qp`      | [`QueryMakeStrategy`]: `make -nqp` dump    |
//! | Make    | `default` | [`StaticStrategy`]: scan the file text     |
//!
//! Every strategy returns a deduplicated list in order of first appearance.
//! The text-parsing halves ([`parse_ninja_targets`], [`parse_make_database`],
//! [`scan_makefile`]) are pure functions so captured output can be parsed
//! without running a tool.

mod makefile_scan;
mod ninja;
mod query_make;

pub use makefile_scan::{StaticStrategy, scan_makefile};
pub use ninja::{NinjaStrategy, parse_ninja_targets};
pub use query_make::{QueryMakeStrategy, parse_make_database};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::buildfile::Dialect;
use crate::core::MakepickError;
use crate::tool::ToolPaths;

/// How targets are listed for Makefiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtractionMethod {
    /// Scan the Makefile text for `name:` lines
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Ask make for its rule database (`make -nqp`)
    #[serde(rename = "qp")]
    QueryMake,
}

impl FromStr for ExtractionMethod {
    type Err = MakepickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(Self::Default),
            "qp" => Ok(Self::QueryMake),
            other => Err(MakepickError::InvalidExtractionMethod {
                method: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::QueryMake => write!(f, "qp"),
        }
    }
}

/// The strategy used to list targets for one build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// `ninja -t targets all`
    Ninja(NinjaStrategy),
    /// `make -nqp` database dump
    QueryMake(QueryMakeStrategy),
    /// Static scan of the Makefile text
    Static(StaticStrategy),
}

impl ExtractionStrategy {
    /// Pick the strategy for a dialect and configured method.
    ///
    /// Ninja files always use the Ninja strategy; the method only matters for
    /// Makefiles.
    #[must_use]
    pub fn select(dialect: Dialect, method: ExtractionMethod, tools: &ToolPaths) -> Self {
        match (dialect, method) {
            (Dialect::Ninja, _) => Self::Ninja(NinjaStrategy::new(tools.ninja.clone())),
            (Dialect::Make, ExtractionMethod::QueryMake) => {
                Self::QueryMake(QueryMakeStrategy::new(tools.make.clone()))
            }
            (Dialect::Make, ExtractionMethod::Default) => Self::Static(StaticStrategy),
        }
    }

    /// Short name for logs and diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ninja(_) => "ninja",
            Self::QueryMake(_) => "qp",
            Self::Static(_) => "default",
        }
    }

    /// Extract the deduplicated target list from `build_file`.
    pub async fn extract(&self, build_file: &Path) -> Result<Vec<String>> {
        tracing::debug!(
            target: "extract",
            "Extracting targets from {} with the {} strategy",
            build_file.display(),
            self.name()
        );

        let targets = match self {
            Self::Ninja(strategy) => strategy.extract(build_file).await?,
            Self::QueryMake(strategy) => strategy.extract(build_file).await?,
            Self::Static(strategy) => strategy.extract(build_file).await?,
        };

        let targets = dedup_targets(targets);
        tracing::debug!(target: "extract", "Found {} targets", targets.len());
        Ok(targets)
    }
}

/// Remove repeated names, keeping the first occurrence of each.
#[must_use]
pub fn dedup_targets(targets: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(targets.len());
    targets.into_iter().filter(|target| seen.insert(target.clone())).collect()
}

/// Directory a subprocess strategy runs from: the build file's own directory.
pub(crate) fn working_dir(build_file: &Path) -> &Path {
    match build_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_method_parse_and_display() {
        assert_eq!("default".parse::<ExtractionMethod>().unwrap(), ExtractionMethod::Default);
        assert_eq!("qp".parse::<ExtractionMethod>().unwrap(), ExtractionMethod::QueryMake);
        assert_eq!(ExtractionMethod::QueryMake.to_string(), "qp");
        assert!(matches!(
            "fancy".parse::<ExtractionMethod>(),
            Err(MakepickError::InvalidExtractionMethod { .. })
        ));
    }

    #[test]
    fn test_select_strategy() {
        let tools = ToolPaths::default().with_make("gmake").with_ninja("ninja-1.12");

        assert_eq!(
            ExtractionStrategy::select(Dialect::Ninja, ExtractionMethod::QueryMake, &tools),
            ExtractionStrategy::Ninja(NinjaStrategy::new("ninja-1.12"))
        );
        assert_eq!(
            ExtractionStrategy::select(Dialect::Make, ExtractionMethod::QueryMake, &tools),
            ExtractionStrategy::QueryMake(QueryMakeStrategy::new("gmake"))
        );
        assert_eq!(
            ExtractionStrategy::select(Dialect::Make, ExtractionMethod::Default, &tools),
            ExtractionStrategy::Static(StaticStrategy)
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let targets = vec!["b", "a", "b", "c", "a"].into_iter().map(String::from).collect();
        assert_eq!(dedup_targets(targets), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_working_dir() {
        assert_eq!(working_dir(Path::new("/a/b/Makefile")), Path::new("/a/b"));
        assert_eq!(working_dir(Path::new("Makefile")), Path::new("."));
    }

    #[tokio::test]
    async fn test_static_extraction_scenario() {
        let temp = TempDir::new().unwrap();
        let makefile = temp.path().join("Makefile");
        fs::write(&makefile, "all:\n\tfoo\n\n.PHONY: all\nbuild:\n\tbar").unwrap();

        let strategy =
            ExtractionStrategy::select(Dialect::Make, ExtractionMethod::Default, &ToolPaths::default());
        let targets = strategy.extract(&makefile).await.unwrap();
        assert_eq!(targets, vec!["all", "build"]);
    }

    #[tokio::test]
    async fn test_static_extraction_dedups() {
        let temp = TempDir::new().unwrap();
        let makefile = temp.path().join("Makefile");
        fs::write(&makefile, "all: lib\nlib:\nall: extra\ntest:\nlib: more\n").unwrap();

        let targets = ExtractionStrategy::Static(StaticStrategy).extract(&makefile).await.unwrap();
        assert_eq!(targets, vec!["all", "lib", "test"]);
    }
}
