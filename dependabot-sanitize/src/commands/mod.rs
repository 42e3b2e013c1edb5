//! Command implementations for the `dependabot-sanitize` CLI.

pub mod sanitize;
