//! Seconds-to-timestamp conversions used by every output format.

/// Format seconds as a human-readable clock string.
///
/// Yields `MM:SS` while the hour component is zero, `HH:MM:SS` otherwise,
/// all components zero-padded. Fractional seconds are truncated.
pub fn to_clock(seconds: f64) -> String {
    let total = clamp_seconds(seconds) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Format seconds as an SRT timestamp, `HH:MM:SS,mmm`.
///
/// The millisecond part is obtained by truncation, not rounding, so the
/// mapping is monotone: `s1 < s2` implies `to_srt_clock(s1) <= to_srt_clock(s2)`
/// lexicographically.
pub fn to_srt_clock(seconds: f64) -> String {
    let total_millis = (clamp_seconds(seconds) * 1000.0) as u64;
    let millis = total_millis % 1000;
    let total = total_millis / 1000;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

// Negative and NaN inputs are out of contract for callers in this crate;
// clamping keeps the output a well-formed timestamp anyway.
fn clamp_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
