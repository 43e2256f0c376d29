// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Push the front of a random Anki card through PushPlus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
pub struct Args {
    /// Path to config file (default: ./config.toml, then the user config dir)
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the card instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}
