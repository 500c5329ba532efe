use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Recursive enumeration of the files under a cache root.
///
/// Entries that cannot be read or stat'd are skipped, not surfaced as
/// errors; a fresh walk is performed on every call.
pub struct CacheWalker {
    root: PathBuf,
}

impl CacheWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Yield `(path, size_bytes, last_write_time)` for every reachable file.
    pub fn files(&self) -> Vec<(PathBuf, u64, SystemTime)> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    log::debug!("Skipping unstatable file {:?}: {}", entry.path(), e);
                    continue;
                }
            };

            // A missing mtime sorts as most stale rather than failing the walk.
            let last_write = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((entry.into_path(), metadata.len(), last_write));
        }
        files
    }
}
