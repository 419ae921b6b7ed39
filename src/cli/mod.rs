// CLI module for scribegate

use clap::Parser;
use std::path::PathBuf;

/// scribegate - caching, rate-limited gateway for LLM chat completions
#[derive(Parser, Debug)]
#[command(name = "scribegate", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.scribegate/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listening port, overriding the config file
    #[arg(long)]
    pub port: Option<u16>,
}
