//! In-memory target cache keyed by build-file path.
//!
//! Extracting targets can mean running `make -nqp` or `ninja -t targets`,
//! which is slow on large projects. [`TargetCache`] remembers the last list
//! produced for each build file together with the file's modification time
//! and serves it again while that time is unchanged.
//!
//! # Invalidation
//!
//! An entry is only returned when the file's current modification time equals
//! the stored one and the stored list is non-empty. Anything else re-runs the
//! extraction. There is no persistence: the cache lives as long as the host
//! process and is emptied by [`TargetCache::reset`].
//!
//! # Concurrency
//!
//! All state sits behind one `tokio::sync::Mutex`, held for the whole
//! read-check-extract-write sequence of [`TargetCache::get_targets`]. Clones
//! share the same state.
//!
//! # Example
//!
//! ```rust,no_run
//! use makepick_cli::buildfile::Dialect;
//! use makepick_cli::cache::{CachePolicy, TargetCache};
//! use makepick_cli::extract::{ExtractionMethod, ExtractionStrategy};
//! use makepick_cli::tool::ToolPaths;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cache = TargetCache::new();
//! let strategy =
//!     ExtractionStrategy::select(Dialect::Make, ExtractionMethod::Default, &ToolPaths::default());
//! let targets = cache
//!     .get_targets(Path::new("Makefile"), &strategy, CachePolicy::default().with_sort(true))
//!     .await?;
//! println!("{}", targets.join("\n"));
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;

use crate::extract::ExtractionStrategy;

/// Whether to consult/store cached lists and whether to sort them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Serve and store entries
    pub caching: bool,
    /// Return targets in ascending lexicographic order
    pub sort: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            caching: true,
            sort: false,
        }
    }
}

impl CachePolicy {
    /// Enable or disable caching
    #[must_use]
    pub const fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    /// Enable or disable sorting
    #[must_use]
    pub const fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }
}

/// A cached target list for one build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Targets as last returned for the file
    pub targets: Vec<String>,
    /// File modification time when `targets` were extracted
    pub modtime: Option<SystemTime>,
    /// Whether `targets` is already in ascending order
    pub sorted: bool,
}

impl CacheEntry {
    fn is_fresh(&self, modtime: Option<SystemTime>) -> bool {
        self.modtime == modtime && !self.targets.is_empty()
    }
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests served from an entry
    pub hits: usize,
    /// Requests that ran an extraction
    pub misses: usize,
    /// Entries currently stored
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage of all requests.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: usize,
    misses: usize,
}

/// Process-lifetime cache of extracted target lists.
#[derive(Debug, Clone, Default)]
pub struct TargetCache {
    state: Arc<Mutex<CacheState>>,
}

impl TargetCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target list for `build_file`, from the cache or a fresh extraction.
    ///
    /// With `policy.caching` a fresh entry (same modification time, non-empty
    /// list) is returned as-is; otherwise `strategy` runs and, with caching on,
    /// its result replaces the entry. With `policy.sort` the result is sorted
    /// unless it came from an entry already marked sorted.
    ///
    /// # Errors
    ///
    /// Returns the strategy's error unchanged. A failed extraction leaves any
    /// existing entry for the file untouched.
    pub async fn get_targets(
        &self,
        build_file: &Path,
        strategy: &ExtractionStrategy,
        policy: CachePolicy,
    ) -> Result<Vec<String>> {
        let key = cache_key(build_file);
        let modtime = modification_time(build_file);

        let mut state = self.state.lock().await;

        let cached = if policy.caching {
            state
                .entries
                .get(&key)
                .filter(|entry| entry.is_fresh(modtime))
                .map(|entry| (entry.targets.clone(), entry.sorted))
        } else {
            None
        };

        let (mut targets, already_sorted) = if let Some((targets, sorted)) = cached {
            state.hits += 1;
            tracing::debug!(
                target: "cache",
                "Cache hit for {} ({} targets)",
                key.display(),
                targets.len()
            );
            (targets, sorted)
        } else {
            state.misses += 1;
            tracing::debug!(target: "cache", "Cache miss for {}", key.display());
            (strategy.extract(build_file).await?, false)
        };

        if policy.sort && !already_sorted {
            targets.sort();
        }

        if policy.caching {
            state.entries.insert(
                key,
                CacheEntry {
                    targets: targets.clone(),
                    modtime,
                    sorted: policy.sort,
                },
            );
        }

        Ok(targets)
    }

    /// Clear every entry and the statistics.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        let dropped = state.entries.len();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
        tracing::debug!(target: "cache", "Cache reset ({} entries dropped)", dropped);
    }

    /// The stored entry for `build_file`, if any.
    pub async fn entry(&self, build_file: &Path) -> Option<CacheEntry> {
        self.state.lock().await.entries.get(&cache_key(build_file)).cloned()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    /// Current counters
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }
}

fn cache_key(build_file: &Path) -> PathBuf {
    std::path::absolute(build_file).unwrap_or_else(|_| build_file.to_path_buf())
}

fn modification_time(build_file: &Path) -> Option<SystemTime> {
    std::fs::metadata(build_file).and_then(|meta| meta.modified()).ok()
}
