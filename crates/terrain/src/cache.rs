//! Response caches keyed by request URL.

use std::collections::HashMap;
use std::sync::RwLock;

/// Storage for raw response bodies.
///
/// Implementations must be shareable across tasks; the client only holds a
/// shared reference.
pub trait Cache: Send + Sync {
    /// Look up a previously stored body.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a body.
    fn put(&self, key: String, bytes: Vec<u8>);
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn put(&self, _key: String, _bytes: Vec<u8>) {}
}

/// Unbounded in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: String, bytes: Vec<u8>) {
        // A poisoned lock only loses the cache entry.
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, bytes);
        }
    }
}
