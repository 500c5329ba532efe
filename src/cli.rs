use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Terminal,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cachetrim")]
#[command(about = "Bounds a cache directory under a byte budget by evicting least-recently-used files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evict least-recently-written files until the cache fits its budget
    Trim {
        /// Cache directory to trim
        path: PathBuf,

        /// Maximum cache size in bytes (falls back to CACHETRIM_MAX_SIZE)
        #[arg(long = "max-size")]
        max_size: Option<u64>,

        /// Extra bytes to free beyond the budget (falls back to CACHETRIM_HEADROOM)
        #[arg(long)]
        headroom: Option<u64>,

        /// Delete evicted files instead of only logging them
        #[arg(long)]
        delete: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Report entry count, total size and pinned files for a cache directory
    Stats {
        /// Cache directory to inspect
        path: PathBuf,

        /// Maximum cache size in bytes (falls back to CACHETRIM_MAX_SIZE)
        #[arg(long = "max-size")]
        max_size: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}
