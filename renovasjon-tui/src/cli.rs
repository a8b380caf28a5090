use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "renovasjon",
    about = "Look up upcoming waste collections for a Norwegian address"
)]
pub(crate) struct Cli {
    /// Address to look up on start, e.g. "Jonas Lies gate 20, 2000 Lillestrøm"
    pub address: Option<String>,

    /// TOML file overriding endpoints, app key, and timeout
    #[arg(long, env = "RENOVASJON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write logs here (filtered by RUST_LOG); the terminal belongs to the UI
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
