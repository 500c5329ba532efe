//! Item capability the eviction engine is generic over.

use std::time::SystemTime;

/// Capability an item exposes to the eviction engine.
///
/// `size_bytes` and `recency` are fixed at construction. `pinned` may consult
/// external state and is re-evaluated on every call; implementations must keep
/// it side-effect free and idempotent, since the engine calls it once per
/// eviction-scan visit and once more before any destructive action.
pub trait Evictable {
    fn size_bytes(&self) -> u64;

    fn recency(&self) -> SystemTime;

    /// Whether the item is exempt from eviction. Unpinned unless overridden.
    fn pinned(&self) -> bool {
        false
    }
}

/// Plain value item: a size and a recency timestamp, never pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheItem {
    size_bytes: u64,
    recency: SystemTime,
}

impl CacheItem {
    pub fn new(size_bytes: u64, recency: SystemTime) -> Self {
        Self {
            size_bytes,
            recency,
        }
    }
}

impl Evictable for CacheItem {
    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    fn recency(&self) -> SystemTime {
        self.recency
    }
}
