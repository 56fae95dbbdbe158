use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "todotree", about = concat!("todotree v", env!("CARGO_PKG_VERSION"), " - a live, foldable view of a markdown checklist"), version)]
pub struct Cli {
    /// Markdown file to view
    pub file: PathBuf,

    /// Print the parsed tree as JSON and exit
    #[arg(long, conflicts_with = "print")]
    pub json: bool,

    /// Print the tree as an indented outline and exit
    #[arg(long)]
    pub print: bool,

    /// Config file (default: ~/.config/todotree/config.toml)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Debounce window for file changes, in milliseconds
    #[arg(long = "debounce-ms", value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Append logs to this file (filter with TODOTREE_LOG)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
