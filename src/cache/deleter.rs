//! Action taken on an evicted file's backing resource.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Deletion collaborator invoked for each evicted file. Failures are
/// reported to the caller, which logs and moves on to the next file.
pub trait ResourceDeleter {
    fn delete(&self, path: &Path) -> Result<()>;
}

/// Logs each eviction without touching the filesystem. The default: a trim
/// reports what it would have deleted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDeleter;

impl ResourceDeleter for LoggingDeleter {
    fn delete(&self, path: &Path) -> Result<()> {
        log::info!("Would delete cache file: {:?}", path);
        Ok(())
    }
}

/// Removes evicted files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDeleter;

impl ResourceDeleter for FsDeleter {
    fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to delete cache file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_logging_deleter_leaves_file_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entry.bin");
        fs::write(&path, b"data").unwrap();

        LoggingDeleter.delete(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_fs_deleter_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entry.bin");
        fs::write(&path, b"data").unwrap();

        FsDeleter.delete(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_fs_deleter_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = FsDeleter.delete(&temp_dir.path().join("absent.bin"));
        assert!(result.is_err());
    }
}
