//! Least-recently-used eviction engine bounded by a byte budget.
//!
//! The engine holds items in recency order and frees space in two phases:
//! a read-only scan that marks candidates against a projected size total,
//! followed by a single step that removes the marked items and updates the
//! live size total. Pinned items are skipped during the scan and never
//! appear in the eviction set, so a cache whose pinned items alone exceed
//! the budget legitimately ends over budget.

use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::cache::item::Evictable;

/// Composite ordering key: recency first (most stale sorts first), then the
/// insertion sequence number. The sequence component keeps items with equal
/// timestamps distinct, so a timestamp collision never coalesces two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct EvictionKey {
    recency: SystemTime,
    seq: u64,
}

/// Ordered collection of items plus a running size total.
///
/// Population never triggers eviction; callers trim explicitly. No operation
/// fails: being over budget is a reportable state, not an error.
#[derive(Debug)]
pub struct LruCache<T> {
    items: BTreeMap<EvictionKey, T>,
    current_size: u64,
    max_size: u64,
    next_seq: u64,
}

impl<T: Evictable> LruCache<T> {
    pub fn new(max_size: u64) -> Self {
        Self {
            items: BTreeMap::new(),
            current_size: 0,
            max_size,
            next_seq: 0,
        }
    }

    /// Insert an item and grow the size total. The cache may exceed its
    /// budget after this call; trimming is a separate, explicit step.
    pub fn add(&mut self, item: T) {
        let key = EvictionKey {
            recency: item.recency(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.current_size += item.size_bytes();
        self.items.insert(key, item);
    }

    /// Evict least-recently-used items until the total fits under the budget
    /// minus `extra_bytes` of reserved headroom, and return them.
    ///
    /// The scan marks candidates against a projected total computed over a
    /// snapshot; `current_size` and the collection are only touched once the
    /// full eviction set is known. `pinned` is evaluated exactly once per
    /// visited item.
    pub fn make_room_for_size(&mut self, extra_bytes: u64) -> Vec<T> {
        let target = self.max_size.saturating_sub(extra_bytes);

        let mut projected = self.current_size;
        let mut marked = Vec::new();
        for (key, item) in &self.items {
            if projected <= target {
                break;
            }
            if item.pinned() {
                continue;
            }
            marked.push(*key);
            projected -= item.size_bytes();
        }

        let mut evicted = Vec::with_capacity(marked.len());
        for key in marked {
            if let Some(item) = self.items.remove(&key) {
                self.current_size -= item.size_bytes();
                evicted.push(item);
            }
        }
        evicted
    }

    /// Evict down to the budget plus headroom, discarding the eviction set.
    /// Owners that must act on evicted items call `make_room_for_size`.
    pub fn trim(&mut self, extra_bytes: u64) {
        let _ = self.make_room_for_size(extra_bytes);
    }

    /// Remove every item and reset the size total, returning the drained
    /// items so an owner can release per-item resources. Idempotent.
    pub fn clear(&mut self) -> Vec<T> {
        self.current_size = 0;
        std::mem::take(&mut self.items).into_values().collect()
    }

    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn over_budget(&self) -> bool {
        self.current_size > self.max_size
    }

    /// Items in eviction order, most stale first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }
}
