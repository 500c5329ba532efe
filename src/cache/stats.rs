use serde::Serialize;
use std::fmt;

/// Outcome of a trim pass.
#[derive(Debug, Clone, Serialize)]
pub struct TrimStats {
    pub evicted: usize,
    pub bytes_freed: u64,
    pub retained: usize,
    pub bytes_retained: u64,
    /// Evicted items whose link count rose between the scan and the delete,
    /// so deletion was skipped.
    pub pinned_skipped: usize,
    pub files_deleted: usize,
    pub delete_failures: usize,
    pub duration_ms: u64,
}

impl fmt::Display for TrimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Evicted {} files ({} bytes) in {}ms. Remaining: {} files ({} bytes)",
            self.evicted, self.bytes_freed, self.duration_ms, self.retained, self.bytes_retained
        )
    }
}

/// Point-in-time snapshot of the cache contents.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_size: u64,
    pub max_size: u64,
    pub pinned: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} of {} bytes used, {} pinned",
            self.entries, self.total_size, self.max_size, self.pinned
        )
    }
}
