//! Media duration probes.
//!
//! A probe turns a `MediaLocator` into a duration in seconds, or reports the
//! media as unavailable.

use std::collections::HashMap;
use std::process::Command;

use tracing::debug;

use crate::error::{PlaylistError, Result};
use crate::media::MediaLocator;
use crate::timecode::parse_duration;

/// Something that can measure the duration of media.
pub trait MediaProbe {
    /// Name for logs and error messages.
    fn name(&self) -> &'static str;

    /// Duration of the media at `locator` in seconds.
    fn duration(&self, locator: &MediaLocator) -> Result<f64>;
}

/// Measures durations with the `ffprobe` tool.
#[derive(Debug, Clone)]
pub struct Ffprobe {
    program: String,
}

impl Ffprobe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check if the configured ffprobe binary runs.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for Ffprobe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl MediaProbe for Ffprobe {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    fn duration(&self, locator: &MediaLocator) -> Result<f64> {
        let unavailable = |reason: String| PlaylistError::media_unavailable(locator.to_string(), reason);

        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(locator.as_os_str())
            .output()
            .map_err(|e| unavailable(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(unavailable(format!("{} failed: {}", self.program, stderr.trim())));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration = parse_probe_output(&stdout)
            .ok_or_else(|| unavailable(format!("no duration reported ({})", stdout.trim())))?;
        debug!(%locator, duration, "measured media duration");
        Ok(duration)
    }
}

/// Parse the first positive number printed by ffprobe.
fn parse_probe_output(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .find(|d| d.is_finite() && *d > 0.0)
}

/// Durations supplied by the user, matched by file name.
#[derive(Debug, Clone, Default)]
pub struct KnownDurations {
    by_name: HashMap<String, f64>,
}

impl KnownDurations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, seconds: f64) {
        self.by_name.insert(name.into(), seconds);
    }

    /// Parse a `NAME=TIMECODE` pair such as `video.mp4=30:00`.
    ///
    /// A bare number of seconds is accepted as the timecode too.
    pub fn insert_spec(&mut self, spec: &str) -> Result<()> {
        let invalid = || PlaylistError::InvalidTimecode {
            input: spec.to_string(),
        };
        let (name, timecode) = spec.split_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }
        let seconds = parse_duration(timecode)?;
        self.insert(name, seconds);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl MediaProbe for KnownDurations {
    fn name(&self) -> &'static str {
        "known durations"
    }

    fn duration(&self, locator: &MediaLocator) -> Result<f64> {
        locator
            .file_name()
            .and_then(|name| self.by_name.get(name))
            .copied()
            .ok_or_else(|| {
                PlaylistError::media_unavailable(locator.to_string(), "no duration supplied")
            })
    }
}

/// Tries each probe in order and returns the first measured duration.
#[derive(Default)]
pub struct ProbeChain {
    probes: Vec<Box<dyn MediaProbe>>,
}

impl std::fmt::Debug for ProbeChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeChain")
            .field(
                "probes",
                &self.probes.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ProbeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, probe: impl MediaProbe + 'static) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl MediaProbe for ProbeChain {
    fn name(&self) -> &'static str {
        "probe chain"
    }

    fn duration(&self, locator: &MediaLocator) -> Result<f64> {
        let mut last_error = None;
        for probe in &self.probes {
            match probe.duration(locator) {
                Ok(duration) => return Ok(duration),
                Err(e) => {
                    debug!(probe = probe.name(), %locator, error = %e, "probe failed");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            PlaylistError::media_unavailable(locator.to_string(), "no media probe configured")
        }))
    }
}
