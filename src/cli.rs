//! CLI interface for Cairn.
//!
//! The app is interactive; the command line only points it at a config
//! file or overrides the connection string.

use std::path::PathBuf;

use clap::Parser;

/// Cairn: browse and add points of interest.
#[derive(Debug, Parser)]
#[command(name = "cairn")]
pub struct Cli {
    /// Config file path. Defaults to `~/.cairn/config.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// MongoDB connection string, overriding the config.
    #[arg(long)]
    pub uri: Option<String>,
}
