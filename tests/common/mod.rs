//! Shared helpers for makepick integration tests

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with an isolated config file
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    config_path: PathBuf,
    tools_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let config_path = temp_dir.path().join(".makepick").join("config.toml");
        let tools_dir = temp_dir.path().join("tools");

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&tools_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            config_path,
            tools_dir,
        })
    }

    /// Project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Config file path passed through `MAKEPICK_CONFIG`
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory for fake tool scripts
    pub fn tools_path(&self) -> &Path {
        &self.tools_dir
    }

    /// Write a file relative to the project directory
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write the config file
    pub fn write_config(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// The makepick binary, run from the project directory
    pub fn makepick(&self) -> Command {
        let mut cmd = Command::cargo_bin("makepick").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("MAKEPICK_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
