use anyhow::{Context, Result};
use std::path::Path;

use crate::cache::deleter::LoggingDeleter;
use crate::cache::file_cache::FileCache;
use crate::cli::OutputFormat;
use crate::config::{EnvironmentSnapshot, TrimConfig};

/// Populate a cache from `path` and report its size snapshot without
/// evicting anything.
pub fn run_stats(path: &Path, max_size: Option<u64>, format: OutputFormat) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Cache root {:?} is not a directory", path);
    }

    let env = EnvironmentSnapshot::from_current_env();
    let config = TrimConfig::resolve(&env, max_size, None, false);

    let mut cache = FileCache::new(path, config.max_size_bytes, LoggingDeleter);
    let stats = cache.stats();
    cache.clear();

    match format {
        OutputFormat::Terminal => println!("{}", stats),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&stats).context("Failed to serialize cache stats")?;
            println!("{}", json);
        }
    }
    Ok(())
}
