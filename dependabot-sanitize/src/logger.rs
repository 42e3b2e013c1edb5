// dependabot-sanitize/src/logger.rs
//! Logger setup for the CLI. Records go to stderr so stdout only ever carries
//! sanitized content.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`, honoring `RUST_LOG` unless `level` overrides it.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// Maps the `--quiet` / `--debug` flags onto an override level.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
