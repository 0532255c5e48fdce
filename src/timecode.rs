//! Timecode formatting and parsing.
//!
//! Durations and playback positions are shown as `M:SS`, or `H:MM:SS` once
//! they reach an hour. The parser accepts both shapes back.

use crate::error::{PlaylistError, Result};

/// Format a duration in seconds as `M:SS` or `H:MM:SS`.
///
/// Fractional seconds are truncated; negative and non-finite values format
/// as zero.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Parse `M:SS` or `H:MM:SS` into whole seconds.
///
/// Seconds must be below 60; minutes must be below 60 in the three-part form.
pub fn parse_time(input: &str) -> Result<u64> {
    let invalid = || PlaylistError::InvalidTimecode {
        input: input.to_string(),
    };

    let numbers = input
        .trim()
        .split(':')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<u64>().ok()
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    match numbers.as_slice() {
        [mins, secs] if *secs < 60 => Ok(mins * 60 + secs),
        [hours, mins, secs] if *mins < 60 && *secs < 60 => Ok(hours * 3600 + mins * 60 + secs),
        _ => Err(invalid()),
    }
}

/// Parse a duration given either as a timecode or as a bare number of
/// seconds (`1800`, `90.5`).
pub fn parse_duration(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(secs),
        Ok(_) => Err(PlaylistError::InvalidTimecode {
            input: input.to_string(),
        }),
        Err(_) => parse_time(trimmed).map(|secs| secs as f64),
    }
}
