//! errors.rs - Setup errors for the dependabot-errors library.
//!
//! These cover configuring and building the sanitizer. Sanitizing a message
//! itself never fails, and the error taxonomy lives in [`crate::taxonomy`].
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SanitizerError {
    #[error("Invalid sanitizer configuration: {0}")]
    InvalidConfig(String),

    #[error("A sanitizer configuration has already been installed for this process")]
    AlreadyInstalled,

    #[error("Failed to compile temp-path pattern: {0}")]
    PatternCompilation(#[from] regex::Error),
}
