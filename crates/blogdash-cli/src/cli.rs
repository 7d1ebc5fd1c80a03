//! CLI argument definitions.

use clap::{Args, Parser};

use crate::commands::Command;

/// Author analytics and paged post table for a blog post service.
#[derive(Parser, Debug)]
#[command(name = "blogdash")]
#[command(author, version = env!("BLOGDASH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection options accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Post service base URL (https://, http://localhost or file://)
    #[arg(long, global = true)]
    pub service: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}
