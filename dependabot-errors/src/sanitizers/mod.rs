//! Building blocks of the message redaction pipeline.
//!
//! `patterns` holds the fixed credential and provider-path expressions plus the
//! builder for the configurable temp-path expression. `capture` implements the
//! two-phase "collect captured secrets, then replace them everywhere" primitive
//! that every redaction pass is built on. The ordered pipeline itself lives in
//! [`crate::sanitizer`].

pub mod capture;
pub mod patterns;
