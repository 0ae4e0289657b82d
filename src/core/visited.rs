use std::collections::HashSet;

use parking_lot::RwLock;
use url::Url;

/// URLs that have been enqueued at least once during this run. Claiming is
/// a single write-locked insert, so for any URL exactly one caller across
/// all workers wins the right to enqueue it. Without this, cyclic link
/// graphs re-enqueue forever even though depth grows along the cycle.
pub struct VisitedSet {
    inner: RwLock<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashSet::new()),
        }
    }

    /// Atomically records `url` as seen. Returns true iff the caller is
    /// the first to claim it and should therefore enqueue it.
    pub fn try_claim(&self, url: &Url) -> bool {
        self.inner.write().insert(url.to_string())
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.inner.read().contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new()
    }
}
