//! Owned handle to an open native file, used for live hard-link queries.

use std::fs::File;
use std::path::Path;

/// Wraps an open file so the current hard-link count can be queried for the
/// lifetime of a cache entry. Opening never fails: a file that cannot be
/// opened yields an empty handle, which reports zero links.
#[derive(Debug)]
pub struct FileHandle {
    file: Option<File>,
}

impl FileHandle {
    pub fn open(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => Self { file: Some(file) },
            Err(e) => {
                log::debug!("Failed to open handle for {:?}: {}", path, e);
                Self { file: None }
            }
        }
    }

    /// Current hard-link count of the backing file. Zero for a handle that
    /// failed to open, was released, or whose metadata query fails.
    #[cfg(unix)]
    pub fn link_count(&self) -> u64 {
        use std::os::unix::fs::MetadataExt;

        self.file
            .as_ref()
            .and_then(|f| f.metadata().ok())
            .map(|m| m.nlink())
            .unwrap_or(0)
    }

    /// Link counts are not exposed through std on this platform; report a
    /// single link so the item is never treated as pinned.
    #[cfg(not(unix))]
    pub fn link_count(&self) -> u64 {
        u64::from(self.file.is_some())
    }

    /// Close the handle. Safe to call more than once; after the first call
    /// the handle is empty and further calls are no-ops.
    pub fn release(&mut self) {
        self.file = None;
    }
}
