// dependabot-sanitize/src/main.rs
//! Entry point for the `dependabot-sanitize` CLI.

use anyhow::Result;
use clap::Parser;
use log::debug;

use dependabot_sanitize::cli::{Cli, Commands};
use dependabot_sanitize::commands::sanitize::run_sanitize;
use dependabot_sanitize::logger;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));
    debug!("dependabot-sanitize started. Version: {}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Commands::Sanitize(cmd) => run_sanitize(cmd),
    }
}
