use anyhow::Result;
use cachetrim::cli::{Cli, Commands};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trim {
            path,
            max_size,
            headroom,
            delete,
            format,
        } => cachetrim::commands::run_trim(&path, max_size, headroom, delete, format),
        Commands::Stats {
            path,
            max_size,
            format,
        } => cachetrim::commands::run_stats(&path, max_size, format),
    }
}
