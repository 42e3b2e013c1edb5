//! Configuration for the message sanitizer.
//!
//! The only configurable inputs are the temp-directory root and the temp-file
//! name prefix used by the updater's temp-file allocator. Together they describe
//! the naming convention of the scratch paths that must be collapsed out of
//! error messages. Neither value is owned here; they are supplied once at
//! startup and treated as immutable for the lifetime of the process.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::errors::SanitizerError;

/// Environment variable overriding [`DEFAULT_TMP_DIR_ROOT`].
pub const TMP_DIR_ENV: &str = "DEPENDABOT_TMP_DIR";
/// Environment variable overriding [`DEFAULT_TMP_FILE_PREFIX`].
pub const TMP_FILE_PREFIX_ENV: &str = "DEPENDABOT_TMP_FILE_PREFIX";

/// Root directory under which the allocator creates scratch directories.
///
/// Relative, so it also matches inside absolute paths: `/tmp/dependabot_x/Gemfile`
/// collapses to `/dependabot_tmp_dir/Gemfile`, keeping the leading slash.
pub const DEFAULT_TMP_DIR_ROOT: &str = "tmp";
/// Prefix the allocator gives every scratch directory it creates.
pub const DEFAULT_TMP_FILE_PREFIX: &str = "dependabot_";

static INSTALLED_CONFIG: OnceCell<SanitizerConfig> = OnceCell::new();

/// Temp-path naming convention consumed by the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Root of the scratch area, without a trailing slash (e.g. `/home/dependabot/tmp`).
    pub tmp_dir_root: String,
    /// Name prefix of every scratch directory under the root.
    pub tmp_file_prefix: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            tmp_dir_root: DEFAULT_TMP_DIR_ROOT.to_string(),
            tmp_file_prefix: DEFAULT_TMP_FILE_PREFIX.to_string(),
        }
    }
}

impl SanitizerConfig {
    pub fn new(tmp_dir_root: impl Into<String>, tmp_file_prefix: impl Into<String>) -> Self {
        Self {
            tmp_dir_root: tmp_dir_root.into(),
            tmp_file_prefix: tmp_file_prefix.into(),
        }
    }

    /// Builds a configuration from [`TMP_DIR_ENV`] and [`TMP_FILE_PREFIX_ENV`],
    /// falling back to the defaults for unset or blank variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let tmp_dir_root = read_env(TMP_DIR_ENV).unwrap_or(defaults.tmp_dir_root);
        let tmp_file_prefix = read_env(TMP_FILE_PREFIX_ENV).unwrap_or(defaults.tmp_file_prefix);
        debug!(
            "Sanitizer config from environment: tmp_dir_root='{}', tmp_file_prefix='{}'",
            tmp_dir_root, tmp_file_prefix
        );
        Self { tmp_dir_root, tmp_file_prefix }
    }

    /// Checks the configuration is usable and normalizes a trailing slash on the root.
    pub fn validated(mut self) -> Result<Self, SanitizerError> {
        let trimmed = self.tmp_dir_root.trim();
        if trimmed.is_empty() {
            return Err(SanitizerError::InvalidConfig(
                "tmp_dir_root must not be empty".to_string(),
            ));
        }
        // A bare "/" root stays as-is; anything else loses its trailing separator.
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        self.tmp_dir_root = normalized.to_string();

        if self.tmp_file_prefix.chars().any(char::is_whitespace) {
            return Err(SanitizerError::InvalidConfig(format!(
                "tmp_file_prefix '{}' must not contain whitespace",
                self.tmp_file_prefix
            )));
        }
        Ok(self)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Installs the process-wide configuration. Must happen before the first
/// call to [`crate::sanitizer::global`]; only the first installation wins.
pub fn install_global(config: SanitizerConfig) -> Result<(), SanitizerError> {
    let config = config.validated()?;
    info!(
        "Installing sanitizer config: tmp_dir_root='{}', tmp_file_prefix='{}'",
        config.tmp_dir_root, config.tmp_file_prefix
    );
    INSTALLED_CONFIG
        .set(config)
        .map_err(|_| SanitizerError::AlreadyInstalled)
}

/// The installed configuration, initializing it from the environment if
/// nothing was installed yet.
pub fn global_config() -> &'static SanitizerConfig {
    INSTALLED_CONFIG.get_or_init(|| {
        SanitizerConfig::from_env().validated().unwrap_or_else(|e| {
            log::warn!("Ignoring invalid sanitizer config from environment ({}); using defaults.", e);
            SanitizerConfig::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SanitizerConfig::default();
        assert_eq!(config.tmp_dir_root, "tmp");
        assert_eq!(config.tmp_file_prefix, "dependabot_");
    }

    #[test]
    fn test_validated_strips_trailing_slash() {
        let config = SanitizerConfig::new("/var/tmp/", "dependabot_").validated().unwrap();
        assert_eq!(config.tmp_dir_root, "/var/tmp");
    }

    #[test]
    fn test_validated_keeps_filesystem_root() {
        let config = SanitizerConfig::new("/", "dependabot_").validated().unwrap();
        assert_eq!(config.tmp_dir_root, "/");
    }

    #[test]
    fn test_validated_rejects_empty_root() {
        let err = SanitizerConfig::new("  ", "dependabot_").validated().unwrap_err();
        assert!(matches!(err, SanitizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_validated_rejects_whitespace_prefix() {
        let err = SanitizerConfig::new("tmp", "bad prefix").validated().unwrap_err();
        assert!(matches!(err, SanitizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_deserialize_partial_config_uses_defaults() {
        let config: SanitizerConfig =
            serde_json::from_str(r#"{"tmp_dir_root": "/home/dependabot/tmp"}"#).unwrap();
        assert_eq!(config.tmp_dir_root, "/home/dependabot/tmp");
        assert_eq!(config.tmp_file_prefix, DEFAULT_TMP_FILE_PREFIX);
    }
}
