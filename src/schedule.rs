//! Wall-clock scheduling.
//!
//! Computes where to start the lead-in entry so that it finishes exactly at a
//! target time of day, letting the next entry begin at that time.
//!
//! All arithmetic runs on local naive wall-clock time. The current moment is
//! passed in explicitly (see [`Clock`]), so every function here is pure.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlaylistError, Result};

/// A time of day with minute resolution and no date component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time of day, rejecting out-of-range values.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour < 24 && minute < 60 {
            Ok(Self {
                hour: hour as u8,
                minute: minute as u8,
            })
        } else {
            Err(PlaylistError::InvalidTimeOfDay {
                input: format!("{}:{:02}", hour, minute),
            })
        }
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// This time of day at second zero.
    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self {
            hour: 13,
            minute: 0,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PlaylistError::InvalidTimeOfDay {
            input: s.to_string(),
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;

        let parse_part = |part: &str, max_len: usize| -> Option<u32> {
            if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit())
            {
                return None;
            }
            part.parse().ok()
        };

        let hour = parse_part(hour, 2).ok_or_else(invalid)?;
        // Minutes are always two digits, like an HTML time input
        if minute.len() != 2 {
            return Err(invalid());
        }
        let minute = parse_part(minute, 2).ok_or_else(invalid)?;

        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = PlaylistError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Source of the current wall-clock time.
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// The system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Outcome of a synchronized start computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncPlan {
    /// The instant the target entry should begin
    pub target_instant: NaiveDateTime,
    /// Seconds from now until `target_instant` (always positive)
    pub delta_seconds: f64,
    /// Duration of the lead-in entry used for the computation
    pub lead_in_seconds: f64,
    /// Position in the lead-in entry to start playback from
    pub start_offset_seconds: f64,
}

impl SyncPlan {
    /// Whether the lead-in is too short to reach the target time.
    ///
    /// Playback then starts from zero and the lead-in finishes before the
    /// target instant.
    pub fn finishes_early(&self) -> bool {
        self.lead_in_seconds < self.delta_seconds
    }

    /// How many seconds before the target instant the lead-in ends.
    pub fn early_by_seconds(&self) -> f64 {
        (self.delta_seconds - self.lead_in_seconds).max(0.0)
    }

    /// Whether the target instant falls on the day after `now`.
    pub fn is_tomorrow(&self, now: NaiveDateTime) -> bool {
        self.target_instant.date() > now.date()
    }
}

/// The next occurrence of `target` strictly after `now`.
///
/// A target equal to `now` counts as already passed and rolls to tomorrow.
pub fn next_occurrence(target: TimeOfDay, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(target.as_naive_time());
    if today <= now {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Compute where to start a lead-in of `lead_in_seconds` so it ends at `target`.
///
/// An unknown lead-in duration is passed as zero. The offset is clamped to
/// zero when the lead-in is shorter than the time remaining.
pub fn synchronized_start_offset(
    target: TimeOfDay,
    now: NaiveDateTime,
    lead_in_seconds: f64,
) -> SyncPlan {
    let target_instant = next_occurrence(target, now);
    let delta = target_instant - now;
    let delta_seconds =
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1_000_000_000.0;

    let lead_in_seconds = if lead_in_seconds.is_finite() {
        lead_in_seconds.max(0.0)
    } else {
        0.0
    };
    let start_offset_seconds = (lead_in_seconds - delta_seconds).max(0.0);

    SyncPlan {
        target_instant,
        delta_seconds,
        lead_in_seconds,
        start_offset_seconds,
    }
}
