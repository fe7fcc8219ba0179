//! Build-file discovery.
//!
//! Given a base directory and an ordered list of directories to search (relative
//! to the base, or absolute), [`locate`] finds the first build-description file
//! and reports which build tool it belongs to.
//!
//! # Search Order
//!
//! Directories are tried in the order supplied. Within one directory the
//! Makefile names are tested before `build.ninja`:
//!
//! ```text
//! <base>/<dir1>/Makefile
//! <base>/<dir1>/makefile
//! <base>/<dir1>/GNUmakefile
//! <base>/<dir1>/build.ninja
//! <base>/<dir2>/Makefile
//! ...
//! ```
//!
//! The conventional order built by [`SearchDirs`] is: the configured build
//! directory override, the base directory itself (`""`), then `build`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use makepick_cli::buildfile::{Dialect, SearchDirs, locate};
//! use std::path::Path;
//!
//! let dirs = SearchDirs::new().with_extra(["build"]).into_dirs();
//! if let Some(found) = locate(Path::new("/work/project"), &dirs) {
//!     println!("{} ({})", found.path.display(), found.dialect);
//! }
//! ```

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{MAKEFILE_NAMES, NINJA_FILE_NAME, PROJECT_ROOT_MARKERS};
use crate::core::MakepickError;

/// Which build tool a build-description file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// A Makefile (`Makefile`, `makefile` or `GNUmakefile`)
    Make,
    /// A Ninja build file (`build.ninja`)
    Ninja,
}

impl Dialect {
    /// Dialect implied by a file path: Ninja when the name ends in `build.ninja`.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_ninja = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(NINJA_FILE_NAME));
        if is_ninja { Self::Ninja } else { Self::Make }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Make => write!(f, "make"),
            Self::Ninja => write!(f, "ninja"),
        }
    }
}

/// A located build-description file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFile {
    /// Path of the file
    pub path: PathBuf,
    /// Build tool the file belongs to
    pub dialect: Dialect,
}

impl BuildFile {
    /// Wrap a known file path, deriving the dialect from its name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dialect = Dialect::from_path(&path);
        Self {
            path,
            dialect,
        }
    }

    /// Directory containing the file; subprocess strategies run from here.
    #[must_use]
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Every candidate path in priority order.
///
/// An empty `extra_dirs` is treated as `[""]`, i.e. the base directory only.
#[must_use]
pub fn search_candidates(base_dir: &Path, extra_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let default_dirs = [PathBuf::new()];
    let dirs = if extra_dirs.is_empty() { &default_dirs[..] } else { extra_dirs };

    dirs.iter()
        .flat_map(|dir| {
            let dir = base_dir.join(dir);
            MAKEFILE_NAMES
                .iter()
                .copied()
                .chain(std::iter::once(NINJA_FILE_NAME))
                .map(move |name| dir.join(name))
        })
        .collect()
}

/// Find the first existing build file under `base_dir`.
///
/// Returns `None` when nothing in the search space exists; this is not an
/// error at this level. Use [`locate_required`] to get a
/// [`MakepickError::BuildFileNotFound`] instead.
#[must_use]
pub fn locate(base_dir: &Path, extra_dirs: &[PathBuf]) -> Option<BuildFile> {
    for candidate in search_candidates(base_dir, extra_dirs) {
        if candidate.is_file() {
            tracing::debug!(target: "locator", "Found build file: {}", candidate.display());
            return Some(BuildFile::new(candidate));
        }
        tracing::trace!(target: "locator", "No build file at {}", candidate.display());
    }

    tracing::debug!(target: "locator", "No build file found under {}", base_dir.display());
    None
}

/// Like [`locate`], but absence becomes [`MakepickError::BuildFileNotFound`].
pub fn locate_required(base_dir: &Path, extra_dirs: &[PathBuf]) -> Result<BuildFile, MakepickError> {
    locate(base_dir, extra_dirs).ok_or_else(|| MakepickError::BuildFileNotFound {
        base_dir: base_dir.display().to_string(),
        searched: if extra_dirs.is_empty() {
            vec![String::new()]
        } else {
            extra_dirs.iter().map(|d| d.display().to_string()).collect()
        },
    })
}

/// Builder for the conventional search-directory order.
///
/// ```rust
/// use makepick_cli::buildfile::SearchDirs;
/// use std::path::PathBuf;
///
/// let dirs = SearchDirs::new()
///     .with_build_dir(Some(PathBuf::from("out")))
///     .with_extra(["build"])
///     .into_dirs();
/// assert_eq!(dirs, vec![PathBuf::from("out"), PathBuf::new(), PathBuf::from("build")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchDirs {
    build_dir: Option<PathBuf>,
    extra: Vec<PathBuf>,
}

impl SearchDirs {
    /// Start with just the base directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory tried before the base directory (e.g. an out-of-tree build dir).
    #[must_use]
    pub fn with_build_dir(mut self, build_dir: Option<PathBuf>) -> Self {
        self.build_dir = build_dir;
        self
    }

    /// Directories tried after the base directory.
    #[must_use]
    pub fn with_extra<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extra.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Final ordered list with duplicates removed (first occurrence kept).
    #[must_use]
    pub fn into_dirs(self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        let ordered = self.build_dir.into_iter().chain(std::iter::once(PathBuf::new())).chain(self.extra);
        for dir in ordered {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }
}

/// Walk up from `start` to the nearest directory holding a project marker.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| PROJECT_ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}
