use anyhow::{Context, Result};
use std::path::Path;

use crate::cache::deleter::{FsDeleter, LoggingDeleter, ResourceDeleter};
use crate::cache::file_cache::FileCache;
use crate::cache::stats::TrimStats;
use crate::cli::OutputFormat;
use crate::config::{EnvironmentSnapshot, TrimConfig};

pub fn run_trim(
    path: &Path,
    max_size: Option<u64>,
    headroom: Option<u64>,
    delete: bool,
    format: OutputFormat,
) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Cache root {:?} is not a directory", path);
    }

    let env = EnvironmentSnapshot::from_current_env();
    let config = TrimConfig::resolve(&env, max_size, headroom, delete);

    let stats = if config.delete_files {
        trim_with(path, &config, FsDeleter)
    } else {
        trim_with(path, &config, LoggingDeleter)
    };

    report(&stats, format)
}

fn trim_with<D: ResourceDeleter>(root: &Path, config: &TrimConfig, deleter: D) -> TrimStats {
    let mut cache = FileCache::new(root, config.max_size_bytes, deleter);
    log::info!(
        "Loaded {} files ({} bytes) from {:?}",
        cache.len(),
        cache.current_size(),
        root
    );

    let stats = cache.trim(config.headroom_bytes);
    if cache.over_budget() {
        log::warn!(
            "Cache still over budget after trim: {} of {} bytes are pinned or retained",
            cache.current_size(),
            cache.max_size()
        );
    }
    cache.clear();
    stats
}

fn report(stats: &TrimStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Terminal => {
            println!("{}", stats);
            if stats.delete_failures > 0 {
                println!("{} files could not be deleted", stats.delete_failures);
            }
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(stats).context("Failed to serialize trim stats")?;
            println!("{}", json);
        }
    }
    Ok(())
}
