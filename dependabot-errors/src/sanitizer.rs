//! The ordered message redaction pipeline.
//!
//! [`ErrorMessageSanitizer`] turns arbitrary error text into a
//! [`SanitizedMessage`]. It applies, in this order:
//!
//! 1. temp-directory collapsing (`<root>/<prefix>…` → `dependabot_tmp_dir`),
//!    followed by trimming surrounding whitespace;
//! 2. basic-auth credential removal (`://user:pass@` → `://`);
//! 3. provider-path redaction (`fury.io/<token>` → `fury.io/<redacted>`), for
//!    dedicated source fields only.
//!
//! Sanitizing never fails. Every pass is idempotent, so sanitizing an already
//! sanitized message returns it unchanged.
//!
//! License: MIT OR Apache-2.0

use std::fmt;
use std::ops::Deref;

use lazy_static::lazy_static;
use log::debug;
use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::config::{global_config, SanitizerConfig};
use crate::errors::SanitizerError;
use crate::redaction_log::log_pass_summary_debug;
use crate::sanitizers::capture::{collect_captures, replace_all_literal, replace_capture_groups};
use crate::sanitizers::patterns::{
    tmp_path_regex, AUTH_GROUP, BASIC_AUTH_REGEX, FURY_IO_PATH_REGEX, FURY_IO_REDACTED,
    MIN_RECURRING_TOKEN_LEN, PROVIDER_PATH_GROUP, REDACTED_PLACEHOLDER, TMP_DIR_PLACEHOLDER,
};

/// Text that has been through the redaction pipeline.
///
/// Only an [`ErrorMessageSanitizer`] can produce one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SanitizedMessage(String);

impl SanitizedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for SanitizedMessage {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SanitizedMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SanitizedMessage {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SanitizedMessage {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for SanitizedMessage {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

/// Redacts credentials, provider-path tokens and temp paths from error text.
#[derive(Debug, Clone)]
pub struct ErrorMessageSanitizer {
    config: SanitizerConfig,
    tmp_path: Regex,
}

lazy_static! {
    static ref GLOBAL_SANITIZER: ErrorMessageSanitizer = {
        let config = global_config().clone();
        ErrorMessageSanitizer::new(config.clone()).unwrap_or_else(|e| {
            log::warn!(
                "Failed to build sanitizer for tmp_dir_root='{}' ({}); falling back to defaults.",
                config.tmp_dir_root, e
            );
            ErrorMessageSanitizer::fallback()
        })
    };
}

/// The process-wide sanitizer, built from the installed configuration.
///
/// See [`crate::config::install_global`].
pub fn global() -> &'static ErrorMessageSanitizer {
    &GLOBAL_SANITIZER
}

impl Default for ErrorMessageSanitizer {
    fn default() -> Self {
        Self::fallback()
    }
}

impl ErrorMessageSanitizer {
    pub fn new(config: SanitizerConfig) -> Result<Self, SanitizerError> {
        let config = config.validated()?;
        let tmp_path = tmp_path_regex(&config)?;
        Ok(Self { config, tmp_path })
    }

    fn fallback() -> Self {
        let config = SanitizerConfig::default();
        // Escaped constant input; compiling it cannot fail.
        let tmp_path = tmp_path_regex(&config).unwrap();
        Self { config, tmp_path }
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Sanitizes free-text error output: temp paths, trimming, then credentials.
    ///
    /// Erasing a credential can splice a temp path back together
    /// (`<root>/u:p@dependabot_x`), so the passes repeat until the text is
    /// stable. A round that collapses a path removes a `/` and any other
    /// changing round shortens the text, so the loop ends.
    pub fn sanitize(&self, message: &str) -> SanitizedMessage {
        let mut cleaned = message.to_string();
        loop {
            let collapsed = self.collapse_tmp_paths(&cleaned);
            let next = self.filter_sensitive_data(collapsed.trim());
            if next == cleaned {
                break;
            }
            cleaned = next;
        }
        if cleaned != message {
            debug!(
                target: "dependabot_errors::sanitizer",
                "Sanitized message of {} bytes down to {} bytes",
                message.len(),
                cleaned.len()
            );
        }
        SanitizedMessage(cleaned)
    }

    /// Absent messages pass through untouched.
    pub fn sanitize_optional(&self, message: Option<&str>) -> Option<SanitizedMessage> {
        message.map(|m| self.sanitize(m))
    }

    /// Sanitizes a dedicated source field: credentials, then provider-path tokens.
    ///
    /// The path behind `fury.io/` is always redacted in place. Recurrences
    /// elsewhere in the text are only replaced for tokens of at least
    /// [`MIN_RECURRING_TOKEN_LEN`] bytes, since a one-letter account would
    /// otherwise be cut out of unrelated words.
    pub fn sanitize_source(&self, source: &str) -> SanitizedMessage {
        let filtered = self.filter_sensitive_data(source);
        let tokens: Vec<&str> = collect_captures(&filtered, &FURY_IO_PATH_REGEX, PROVIDER_PATH_GROUP)
            .into_iter()
            .filter(|token| token.len() >= MIN_RECURRING_TOKEN_LEN)
            .collect();
        let in_place = FURY_IO_PATH_REGEX.replace_all(&filtered, NoExpand(FURY_IO_REDACTED));
        let redacted = replace_all_literal(&in_place, &tokens, REDACTED_PLACEHOLDER);
        if redacted != filtered {
            log_pass_summary_debug(PROVIDER_PATH_GROUP, tokens.len(), filtered.len(), redacted.len());
        }
        SanitizedMessage(redacted)
    }

    /// Removes every `user:password@` fragment found after a `://`.
    ///
    /// Removing one fragment can expose another directly behind the same
    /// `://` (`://a:b@c:d@host`), so this repeats until nothing matches. Each
    /// round strictly shortens the text.
    pub fn filter_sensitive_data(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let next = replace_capture_groups(&current, &BASIC_AUTH_REGEX, AUTH_GROUP, "");
            if next.len() == current.len() {
                return next;
            }
            current = next;
        }
    }

    /// Collapses every `<root>/<prefix>…` path to `dependabot_tmp_dir`.
    pub fn collapse_tmp_paths(&self, text: &str) -> String {
        self.tmp_path.replace_all(text, TMP_DIR_PLACEHOLDER).into_owned()
    }
}
