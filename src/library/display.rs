/// Placeholder shown for an unknown or absent time.
pub const UNKNOWN_TIME: &str = "-:--";

/// Format milliseconds as `m:ss`. Minutes are not wrapped into hours.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Like [`format_clock`], but a zero duration renders as [`UNKNOWN_TIME`].
pub fn format_duration(ms: u64) -> String {
    if ms == 0 {
        UNKNOWN_TIME.to_string()
    } else {
        format_clock(ms)
    }
}
