// Export modules for library usage
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod io;

// Re-export commonly used types
pub use crate::cache::{
    CacheItem, CacheStats, Evictable, FileCache, FileCacheItem, FileHandle, FsDeleter,
    LoggingDeleter, LruCache, ResourceDeleter, TrimStats,
};
pub use crate::config::{EnvironmentSnapshot, TrimConfig};
