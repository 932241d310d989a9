//! In-memory cache of analysis results.
//!
//! Entries are keyed by everything that determines the result: the source
//! path, the row cap, and the filter. Nothing is invalidated automatically;
//! callers decide when an underlying file may have changed and call
//! [`ResultCache::invalidate`] or [`ResultCache::clear`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;

use tracing::debug;

use cord_stats::FilterSpec;

use crate::types::AnalysisResult;

/// Identity of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    pub row_limit: Option<usize>,
    pub filter: FilterSpec,
}

/// Cache of completed analysis results.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<CacheKey, AnalysisResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result without computing anything.
    pub fn get(&self, key: &CacheKey) -> Option<&AnalysisResult> {
        self.entries.get(key)
    }

    /// Store a result, replacing any previous entry for the key.
    pub fn insert(&mut self, key: CacheKey, result: AnalysisResult) {
        self.entries.insert(key, result);
    }

    /// Return the cached result for the key, computing and storing it on a
    /// miss. The compute closure runs at most once per key.
    pub fn get_or_compute<F, E>(&mut self, key: CacheKey, compute: F) -> Result<&AnalysisResult, E>
    where
        F: FnOnce() -> Result<AnalysisResult, E>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                debug!(path = %entry.key().path.display(), "cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!(path = %entry.key().path.display(), "cache miss");
                let result = compute()?;
                Ok(entry.insert(result))
            }
        }
    }

    /// Drop every entry for the given source file, regardless of row cap
    /// or filter. Returns how many entries were removed.
    pub fn invalidate(&mut self, path: &PathBuf) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.path != *path);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(path = %path.display(), removed, "cache invalidated");
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
