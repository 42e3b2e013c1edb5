// dependabot-sanitize/src/lib.rs
//! # dependabot-sanitize
//!
//! Operator-facing wrapper around the `dependabot-errors` redaction pipeline.
//! Reads updater output, strips credentials, provider-path tokens and scratch
//! paths, and writes the result back out.

pub mod cli;
pub mod commands;
pub mod logger;
