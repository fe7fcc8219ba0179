//! Constants shared across makepick modules.
//!
//! File names the locator recognizes, default executables and the
//! directory conventions used when assembling the search order.

/// Makefile names, in the order the locator tests them.
///
/// These are the names GNU make itself looks for when no `-f` is given.
pub const MAKEFILE_NAMES: [&str; 3] = ["Makefile", "makefile", "GNUmakefile"];

/// File name of a Ninja build description.
pub const NINJA_FILE_NAME: &str = "build.ninja";

/// Default Make executable.
pub const DEFAULT_MAKE_EXECUTABLE: &str = "make";

/// Default Ninja executable.
pub const DEFAULT_NINJA_EXECUTABLE: &str = "ninja";

/// Conventional out-of-tree build directory searched after the base directory.
pub const DEFAULT_BUILD_SUBDIR: &str = "build";

/// Entries whose presence marks a directory as a project root.
pub const PROJECT_ROOT_MARKERS: [&str; 4] = [".git", ".hg", ".svn", ".projectile"];

/// Environment variable that overrides the global configuration file path.
pub const CONFIG_PATH_ENV: &str = "MAKEPICK_CONFIG";

/// Job count used when available parallelism cannot be determined.
pub const FALLBACK_JOB_COUNT: usize = 4;

/// Tool runs slower than this are logged at info level under `tool::perf`.
pub const SLOW_TOOL_THRESHOLD_SECS: u64 = 1;
