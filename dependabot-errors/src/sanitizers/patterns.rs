//! patterns.rs - Regular expressions used by the redaction passes.
//!
//! The credential and provider-path expressions are fixed and compiled once.
//! The temp-path expression depends on the configured temp-dir root and prefix,
//! so it is built per [`SanitizerConfig`].
//!
//! License: MIT OR Apache-2.0

use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::SanitizerConfig;
use crate::errors::SanitizerError;

/// Capture group holding a `user:password@` (or `user:password%40`) fragment.
pub const AUTH_GROUP: &str = "auth";
/// Capture group holding a provider path that embeds an account token.
pub const PROVIDER_PATH_GROUP: &str = "path";

/// Token substituted for a collapsed temp directory.
pub const TMP_DIR_PLACEHOLDER: &str = "dependabot_tmp_dir";
/// Token substituted for a provider-path secret.
pub const REDACTED_PLACEHOLDER: &str = "<redacted>";
/// A provider-path match after redaction.
pub const FURY_IO_REDACTED: &str = "fury.io/<redacted>";
/// Shortest provider token that is also scrubbed where it recurs outside its URL.
pub const MIN_RECURRING_TOKEN_LEN: usize = 6;

lazy_static! {
    /// `://user:password@` or `://user:password%40`. The user part stops at
    /// `/` so hosts and paths are never mistaken for a user name, and the
    /// password is matched lazily up to the first terminator.
    pub static ref BASIC_AUTH_REGEX: Regex =
        Regex::new(r"://(?P<auth>[^:@/\s]*:[^:@%\s]+?(?:@|%40))").unwrap();

    /// Package feeds that put the account token straight into the URL path.
    pub static ref FURY_IO_PATH_REGEX: Regex =
        Regex::new(r"fury\.io/(?P<path>\S+)").unwrap();
}

/// Builds `<root>/<prefix>[A-Za-z0-9-]*` for the given convention.
pub fn tmp_path_regex(config: &SanitizerConfig) -> Result<Regex, SanitizerError> {
    let root = config.tmp_dir_root.trim_end_matches('/');
    let pattern = format!(
        "{}/{}[a-zA-Z0-9-]*",
        regex::escape(root),
        regex::escape(&config.tmp_file_prefix)
    );
    debug!("Compiling temp-path pattern '{}'", pattern);
    let regex = RegexBuilder::new(&pattern)
        .size_limit(1 << 20)
        .build()?;
    Ok(regex)
}
