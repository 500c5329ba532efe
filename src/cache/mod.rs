pub mod deleter;
pub mod engine;
pub mod file_cache;
pub mod file_handle;
pub mod item;
pub mod stats;

pub use deleter::{FsDeleter, LoggingDeleter, ResourceDeleter};
pub use engine::LruCache;
pub use file_cache::{FileCache, FileCacheItem};
pub use file_handle::FileHandle;
pub use item::{CacheItem, Evictable};
pub use stats::{CacheStats, TrimStats};
