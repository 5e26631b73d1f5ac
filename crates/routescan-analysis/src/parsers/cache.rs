//! Parse cache: Moka LRU keyed by content hash.
//! Same content always produces the same parse result.

use moka::sync::Cache;

use super::types::ParseResult;

pub struct ParseCache {
    inner: Cache<u64, ParseResult>,
}

impl ParseCache {
    /// Create a cache holding up to `capacity` parse results.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    pub fn get(&self, content_hash: u64) -> Option<ParseResult> {
        self.inner.get(&content_hash)
    }

    pub fn insert(&self, content_hash: u64, result: ParseResult) {
        self.inner.insert(content_hash, result);
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        // Route files are a small slice of a workspace; 4096 trees is ample.
        Self::new(4096)
    }
}
