// dependabot-errors/src/redaction_log.rs
//! Debug logging helpers for redaction events.
//!
//! Redaction passes log what they did, never what they removed: any captured
//! fragment is masked with [`redact_sensitive`] before it reaches a log record.

use log::debug;

/// Masks a sensitive fragment for display, keeping only its length for longer values.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

pub fn log_captured_fragment_debug(pass_name: &str, fragment: &str) {
    debug!(
        target: "dependabot_errors::sanitizer",
        "Pass '{}' captured fragment {}",
        pass_name,
        redact_sensitive(fragment)
    );
}

pub fn log_pass_summary_debug(pass_name: &str, fragments: usize, input_len: usize, output_len: usize) {
    if fragments == 0 {
        return;
    }
    debug!(
        target: "dependabot_errors::sanitizer",
        "Pass '{}' redacted {} distinct fragment(s); length {} -> {}",
        pass_name, fragments, input_len, output_len
    );
}
