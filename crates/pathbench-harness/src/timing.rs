//! Extraction of self-reported durations from captured output.
//!
//! The external executables may print a completion line of the form
//! `... completed in <N> seconds`. When present, that in-process self-report
//! is preferred over the wall-clock measurement taken around the spawn (the
//! spawn interval includes launcher startup overhead). The same policy is
//! applied to both the serial and distributed arms so the two measurement
//! bases stay comparable.

use std::time::Duration;

/// Literal preceding the integer second count in a completion line.
const COMPLETED_PREFIX: &str = "completed in ";
/// Literal following the integer second count.
const COMPLETED_SUFFIX: &str = " seconds";

/// Parse a self-reported duration from captured stdout.
///
/// Scans for the first occurrence of `completed in <digits> seconds` and
/// converts the whole-second count to a [`Duration`]. Returns `None` when no
/// well-formed completion line is present; the caller then falls back to
/// wall-clock. Deterministic: the same text always yields the same answer.
#[must_use]
pub fn reported_duration(stdout: &str) -> Option<Duration> {
    let mut rest = stdout;
    while let Some(idx) = rest.find(COMPLETED_PREFIX) {
        let after = &rest[idx + COMPLETED_PREFIX.len()..];
        if let Some(secs) = leading_seconds(after) {
            return Some(Duration::from_secs(secs));
        }
        rest = after;
    }
    None
}

/// Parse `<digits> seconds` at the start of the slice.
fn leading_seconds(s: &str) -> Option<u64> {
    let digits_end = s.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 || !s[digits_end..].starts_with(COMPLETED_SUFFIX) {
        return None;
    }
    s[..digits_end].parse().ok()
}
