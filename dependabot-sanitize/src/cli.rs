//! Command-line interface definition for `dependabot-sanitize`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dependabot_errors::config::{
    DEFAULT_TMP_DIR_ROOT, DEFAULT_TMP_FILE_PREFIX, TMP_DIR_ENV, TMP_FILE_PREFIX_ENV,
};
use dependabot_errors::SanitizerConfig;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "dependabot-sanitize",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip credentials and scratch paths from updater output",
    long_about = "Runs text through the same redaction pipeline the updater applies to every error message: basic-auth credentials are removed from URLs, scratch directory paths are collapsed to `dependabot_tmp_dir`, and (with --source) provider-path access tokens are replaced with `<redacted>`.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes an input file or stdin.
    #[command(about = "Sanitizes an input file or stdin, removing credentials and scratch paths.")]
    Sanitize(SanitizeCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Treat the input as a source URL rather than free-text error output.
    #[arg(long, help = "Treat input as a source field: also redact provider-path tokens, skip temp-path collapsing.")]
    pub source: bool,

    #[arg(long = "line-buffered", help = "Sanitize input line by line (useful for streaming logs).")]
    pub line_buffered: bool,

    #[arg(
        long = "tmp-dir",
        value_name = "DIR",
        env = TMP_DIR_ENV,
        default_value = DEFAULT_TMP_DIR_ROOT,
        help = "Root directory of the updater's scratch area."
    )]
    pub tmp_dir: String,

    #[arg(
        long = "tmp-prefix",
        value_name = "PREFIX",
        env = TMP_FILE_PREFIX_ENV,
        default_value = DEFAULT_TMP_FILE_PREFIX,
        help = "Name prefix of the updater's scratch directories."
    )]
    pub tmp_prefix: String,
}

impl SanitizeCommand {
    pub fn sanitizer_config(&self) -> SanitizerConfig {
        SanitizerConfig::new(self.tmp_dir.clone(), self.tmp_prefix.clone())
    }
}
