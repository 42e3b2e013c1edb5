//! capture.rs - Capture-then-global-replace redaction primitive.
//!
//! A secret matched once inside a URL often recurs elsewhere in the same
//! message, e.g. echoed back in a nested stack trace, where the surrounding
//! pattern no longer matches. Redaction therefore runs in two explicit phases:
//!
//! 1. collect every distinct, non-empty capture of a named group, then
//! 2. replace each captured string literally across the whole text.
//!
//! Collapsing these into a single `Regex::replace_all` would leave the
//! unmatched recurrences in place.
//!
//! License: MIT OR Apache-2.0

use regex::Regex;

use crate::redaction_log::{log_captured_fragment_debug, log_pass_summary_debug};

/// Distinct non-empty captures of `group`, in first-seen order.
pub fn collect_captures<'t>(text: &'t str, pattern: &Regex, group: &str) -> Vec<&'t str> {
    let mut captured: Vec<&'t str> = Vec::new();
    for caps in pattern.captures_iter(text) {
        let Some(m) = caps.name(group) else { continue };
        let fragment = m.as_str();
        if fragment.is_empty() || captured.contains(&fragment) {
            continue;
        }
        captured.push(fragment);
    }
    captured
}

/// Literally replaces every occurrence of each fragment in `text`.
///
/// Longer fragments go first so a fragment that contains a shorter one is not
/// split apart before it can be removed.
pub fn replace_all_literal(text: &str, fragments: &[&str], replacement: &str) -> String {
    let mut ordered = fragments.to_vec();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut out = text.to_string();
    for fragment in ordered {
        if out.contains(fragment) {
            out = out.replace(fragment, replacement);
        }
    }
    out
}

/// Replaces every occurrence of every `group` capture of `pattern` with `replacement`.
pub fn replace_capture_groups(text: &str, pattern: &Regex, group: &str, replacement: &str) -> String {
    let captured = collect_captures(text, pattern, group);
    if captured.is_empty() {
        return text.to_string();
    }
    for fragment in &captured {
        log_captured_fragment_debug(group, fragment);
    }
    let out = replace_all_literal(text, &captured, replacement);
    log_pass_summary_debug(group, captured.len(), text.len(), out.len());
    out
}
