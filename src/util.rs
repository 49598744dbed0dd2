//! Misc small utilities shared across modules.

/// Formats a remaining-wait duration as `H:MM:SS`, sub-second precision
/// dropped. Negative durations clamp to zero.
pub fn format_wait(wait: chrono::Duration) -> String {
    let secs = wait.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// "chip" vs "chips".
pub fn chips_noun(amount: i64) -> &'static str {
    if amount == 1 { "chip" } else { "chips" }
}
