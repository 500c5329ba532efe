//! File-backed cache: populates the eviction engine from a directory scan
//! and reacts to evictions by handing files to a deleter.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::cache::deleter::ResourceDeleter;
use crate::cache::engine::LruCache;
use crate::cache::file_handle::FileHandle;
use crate::cache::item::Evictable;
use crate::cache::stats::{CacheStats, TrimStats};
use crate::io::walker::CacheWalker;

/// A cached file: path, size and last-write time captured at population,
/// plus an owned handle used for live hard-link queries.
#[derive(Debug)]
pub struct FileCacheItem {
    path: PathBuf,
    size_bytes: u64,
    last_write: SystemTime,
    handle: FileHandle,
}

impl FileCacheItem {
    pub fn new(path: PathBuf, size_bytes: u64, last_write: SystemTime, handle: FileHandle) -> Self {
        Self {
            path,
            size_bytes,
            last_write,
            handle,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn link_count(&self) -> u64 {
        self.handle.link_count()
    }

    /// Close the backing handle. Idempotent.
    pub fn release_handle(&mut self) {
        self.handle.release();
    }
}

impl Evictable for FileCacheItem {
    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    fn recency(&self) -> SystemTime {
        self.last_write
    }

    /// Pinned while the backing file has more than one hard link. Queried
    /// live on every call; an invalid handle reports zero links.
    fn pinned(&self) -> bool {
        self.handle.link_count() > 1
    }
}

/// Eviction engine specialized to files under a root directory.
pub struct FileCache<D> {
    engine: LruCache<FileCacheItem>,
    root: Option<PathBuf>,
    deleter: D,
}

impl<D: ResourceDeleter> FileCache<D> {
    /// Populate the cache with every file reachable under `root`.
    ///
    /// Inaccessible entries are skipped rather than surfaced as errors, and
    /// a file that cannot be opened for link queries is held with the
    /// invalid-handle sentinel (never pinned).
    pub fn new(root: &Path, max_size: u64, deleter: D) -> Self {
        let mut engine = LruCache::new(max_size);
        for (path, size_bytes, last_write) in CacheWalker::new(root).files() {
            let handle = FileHandle::open(&path);
            engine.add(FileCacheItem::new(path, size_bytes, last_write, handle));
        }
        Self {
            engine,
            root: Some(root.to_path_buf()),
            deleter,
        }
    }

    /// Evict least-recently-written files until the total fits under the
    /// budget minus `extra_bytes` of headroom, then hand each evicted file
    /// to the deleter.
    ///
    /// Link counts can change between the eviction scan and the delete, so
    /// pinned state is re-checked per file and a newly pinned file is left
    /// on disk. Deletion failures are logged and counted; they never abort
    /// the remaining evictions.
    pub fn trim(&mut self, extra_bytes: u64) -> TrimStats {
        let start = SystemTime::now();
        let evicted = self.engine.make_room_for_size(extra_bytes);

        let mut bytes_freed = 0u64;
        let mut pinned_skipped = 0usize;
        let mut files_deleted = 0usize;
        let mut delete_failures = 0usize;

        let evicted_count = evicted.len();
        for mut item in evicted {
            bytes_freed += item.size_bytes();

            if item.pinned() {
                pinned_skipped += 1;
                log::debug!("Skipping delete of newly pinned file: {:?}", item.path());
                item.release_handle();
                continue;
            }

            item.release_handle();
            match self.deleter.delete(item.path()) {
                Ok(()) => files_deleted += 1,
                Err(e) => {
                    delete_failures += 1;
                    log::warn!("{:#}", e);
                }
            }
        }

        TrimStats {
            evicted: evicted_count,
            bytes_freed,
            retained: self.engine.len(),
            bytes_retained: self.engine.current_size(),
            pinned_skipped,
            files_deleted,
            delete_failures,
            duration_ms: start.elapsed().unwrap_or(Duration::ZERO).as_millis() as u64,
        }
    }

    /// Release every held handle, drop the root reference, and empty the
    /// engine. Safe to call repeatedly.
    pub fn clear(&mut self) {
        for mut item in self.engine.clear() {
            item.release_handle();
        }
        self.root = None;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.engine.len(),
            total_size: self.engine.current_size(),
            max_size: self.engine.max_size(),
            pinned: self.engine.iter().filter(|item| item.pinned()).count(),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.engine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    pub fn current_size(&self) -> u64 {
        self.engine.current_size()
    }

    pub fn max_size(&self) -> u64 {
        self.engine.max_size()
    }

    pub fn over_budget(&self) -> bool {
        self.engine.over_budget()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::deleter::{FsDeleter, LoggingDeleter};
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_file_at(dir: &Path, name: &str, size: usize, age_secs: u64) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; size]).unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
        path
    }

    #[test]
    fn test_population_counts_every_file() {
        let temp_dir = TempDir::new().unwrap();
        write_file_at(temp_dir.path(), "a.bin", 100, 30);
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        write_file_at(&temp_dir.path().join("sub"), "b.bin", 200, 20);

        let cache = FileCache::new(temp_dir.path(), 1000, LoggingDeleter);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.current_size(), 300);
        assert_eq!(cache.root(), Some(temp_dir.path()));
    }

    #[test]
    fn test_trim_with_logging_deleter_leaves_disk_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let old = write_file_at(temp_dir.path(), "old.bin", 100, 300);
        let new = write_file_at(temp_dir.path(), "new.bin", 100, 10);

        let mut cache = FileCache::new(temp_dir.path(), 150, LoggingDeleter);
        let stats = cache.trim(0);

        assert_eq!(stats.evicted, 1);
        assert_eq!(stats.files_deleted, 1);
        assert!(old.exists());
        assert!(new.exists());
    }

    #[test]
    fn test_trim_with_fs_deleter_removes_stalest_files() {
        let temp_dir = TempDir::new().unwrap();
        let old = write_file_at(temp_dir.path(), "old.bin", 100, 300);
        let mid = write_file_at(temp_dir.path(), "mid.bin", 100, 200);
        let new = write_file_at(temp_dir.path(), "new.bin", 100, 10);

        let mut cache = FileCache::new(temp_dir.path(), 150, FsDeleter);
        let stats = cache.trim(0);

        assert_eq!(stats.evicted, 2);
        assert_eq!(stats.files_deleted, 2);
        assert_eq!(stats.delete_failures, 0);
        assert!(!old.exists());
        assert!(!mid.exists());
        assert!(new.exists());
        assert_eq!(cache.current_size(), 100);
    }

    #[cfg(unix)]
    #[test]
    fn test_hard_linked_file_is_pinned_and_survives() {
        let temp_dir = TempDir::new().unwrap();
        let pinned = write_file_at(temp_dir.path(), "pinned.bin", 100, 300);
        fs::hard_link(&pinned, temp_dir.path().join("pinned.link")).unwrap();
        let plain = write_file_at(temp_dir.path(), "plain.bin", 100, 200);

        // The link file itself also shows up in the scan; budget 0 forces
        // everything unpinned out.
        let mut cache = FileCache::new(temp_dir.path(), 0, FsDeleter);
        cache.trim(0);

        assert!(pinned.exists());
        assert!(!plain.exists());
        assert!(cache.over_budget());
    }

    #[test]
    fn test_trim_continues_past_a_failed_delete() {
        let temp_dir = TempDir::new().unwrap();
        let gone = write_file_at(temp_dir.path(), "gone.bin", 100, 300);
        let old = write_file_at(temp_dir.path(), "old.bin", 100, 200);
        write_file_at(temp_dir.path(), "new.bin", 100, 10);

        let mut cache = FileCache::new(temp_dir.path(), 100, FsDeleter);
        // Pull one of the evicted files out from under the deleter.
        fs::remove_file(&gone).unwrap();

        let stats = cache.trim(0);

        assert_eq!(stats.evicted, 2);
        assert_eq!(stats.files_deleted, 1);
        assert_eq!(stats.delete_failures, 1);
        assert!(!old.exists());
    }

    #[test]
    fn test_clear_releases_everything_and_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        write_file_at(temp_dir.path(), "a.bin", 100, 30);
        write_file_at(temp_dir.path(), "b.bin", 100, 20);

        let mut cache = FileCache::new(temp_dir.path(), 1000, LoggingDeleter);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
        assert_eq!(cache.root(), None);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stats_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        write_file_at(temp_dir.path(), "a.bin", 100, 30);

        let cache = FileCache::new(temp_dir.path(), 1000, LoggingDeleter);
        let stats = cache.stats();

        assert_eq!(stats.entries, 1);
        assert_eq!(stats.total_size, 100);
        assert_eq!(stats.max_size, 1000);
        assert_eq!(stats.pinned, 0);
    }
}
