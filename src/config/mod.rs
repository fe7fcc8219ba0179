//! Configuration management for makepick.
//!
//! makepick reads a single user-wide TOML file, [`MakepickConfig`]. There is
//! no per-project file: the build file itself is the project description.
//!
//! # Resolution
//!
//! 1. `--config <PATH>` on the command line
//! 2. `MAKEPICK_CONFIG` environment variable
//! 3. `~/.makepick/config.toml` (`%LOCALAPPDATA%\makepick\config.toml` on Windows)
//!
//! A missing file is not an error. Command-line flags such as `--sort` or
//! `--method` override the loaded values for one invocation.

mod global;

pub use global::MakepickConfig;
