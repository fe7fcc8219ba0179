//! Ninja target listing via `ninja -t targets all`.

use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::working_dir;
use crate::tool::ToolCommand;

// `<target>: <rule>`; the target group is greedy so the last ": " splits
static TARGET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+): (.+)$").expect("ninja target pattern is valid"));

const DIAGNOSTIC_PREFIX: &str = "ninja: ";

/// Strategy that asks ninja for every target in the build graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NinjaStrategy {
    ninja: String,
}

impl NinjaStrategy {
    /// Strategy using the given ninja executable.
    pub fn new(ninja: impl Into<String>) -> Self {
        Self {
            ninja: ninja.into(),
        }
    }

    /// Run ninja against `build_file` from its own directory and parse the listing.
    pub async fn extract(&self, build_file: &Path) -> Result<Vec<String>> {
        let stdout = ToolCommand::ninja_targets(&self.ninja, build_file)
            .current_dir(working_dir(build_file))
            .with_context(build_file.display().to_string())
            .execute_stdout()
            .await?;

        Ok(parse_ninja_targets(&stdout))
    }
}

/// Target names from `ninja -t targets all` output, in output order.
///
/// Lines without a `: ` separator are ignored, as are ninja's own
/// diagnostics (`ninja: warning: ...`).
#[must_use]
pub fn parse_ninja_targets(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.starts_with(DIAGNOSTIC_PREFIX))
        .filter_map(|line| TARGET_LINE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        let output = "app: link\nmain.o: cxx\nbuild.ninja: RERUN\nall: phony\n";
        assert_eq!(parse_ninja_targets(output), vec!["app", "main.o", "build.ninja", "all"]);
    }

    #[test]
    fn test_lines_without_separator_ignored() {
        let output = "\nlonely\nlib/a.o: cc\n";
        assert_eq!(parse_ninja_targets(output), vec!["lib/a.o"]);
    }

    #[test]
    fn test_diagnostics_are_not_targets() {
        let output = "ninja: warning: multiple rules generate gen.h\ngen.h: custom\nninja: error: loading 'build.ninja'\n";
        assert_eq!(parse_ninja_targets(output), vec!["gen.h"]);
    }

    #[test]
    fn test_target_names_with_spaces() {
        let output = "build out: phony in\ncheck: phony\n";
        assert_eq!(parse_ninja_targets(output), vec!["build out", "check"]);
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_ninja_targets("").is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_with_fake_ninja() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let build_dir = temp.path().join("build");
        std::fs::create_dir(&build_dir).unwrap();
        let build_file = build_dir.join("build.ninja");
        std::fs::write(&build_file, "").unwrap();

        // Prints its working directory as a target so the cwd can be checked
        let fake = temp.path().join("fake-ninja");
        std::fs::write(&fake, "#!/bin/sh\necho \"app: link\"\necho \"$(basename \"$PWD\"): phony\"\n")
            .unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let strategy = NinjaStrategy::new(fake.display().to_string());
        let targets = strategy.extract(&build_file).await.unwrap();
        assert_eq!(targets, vec!["app", "build"]);
    }
}
