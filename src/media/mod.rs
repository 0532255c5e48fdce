//! Media layer
//!
//! Everything between a playlist `SourceRef` and something that plays:
//!
//! - `session`: session-scoped handles for user-added files
//! - `probe`: duration measurement (`ffprobe`, user-supplied durations)
//! - `clocked`: a media element that plays against the wall clock
//!
//! The playback coordinator only talks to the [`MediaElement`] trait.

mod clocked;
mod probe;
mod session;

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use crate::error::Result;

pub use clocked::{ClockedMedia, TIME_UPDATE_INTERVAL};
pub use probe::{Ffprobe, KnownDurations, MediaProbe, ProbeChain};
pub use session::{MediaSession, SessionKey};

/// A resolved, loadable media location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLocator {
    File(PathBuf),
    Url(String),
}

impl MediaLocator {
    /// Argument form for external tools.
    pub fn as_os_str(&self) -> &OsStr {
        match self {
            Self::File(path) => path.as_os_str(),
            Self::Url(url) => OsStr::new(url.as_str()),
        }
    }

    /// Final path segment, used to match user-supplied durations.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::File(path) => path.file_name().and_then(|n| n.to_str()),
            Self::Url(url) => url
                .rsplit('/')
                .next()
                .map(|tail| tail.split(['?', '#']).next().unwrap_or(tail))
                .filter(|name| !name.is_empty()),
        }
    }
}

impl fmt::Display for MediaLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Lifecycle notifications from a media element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// The duration of the loaded media became known
    MetadataReady { duration: f64 },
    /// The playback position moved
    TimeUpdate { position: f64 },
    /// Playback reached the end of the media
    Ended,
}

/// A single media element the coordinator drives.
///
/// Mirrors the small surface of a native video element: load a source,
/// play, pause, set the position, and report lifecycle events.
pub trait MediaElement {
    /// Load new media, replacing whatever was loaded. Leaves playback paused.
    fn load(&mut self, locator: MediaLocator) -> Result<()>;

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Set the playback position in seconds. The element clamps it to its
    /// own valid range.
    fn set_current_time(&mut self, seconds: f64);

    /// Authoritative playback position in seconds.
    fn current_time(&self) -> f64;

    /// Duration of the loaded media, zero when unknown.
    fn duration(&self) -> f64;

    /// Drain events raised since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;

    /// Bring the element's clock up to `now` before it is driven.
    ///
    /// Elements that follow a real playback clock have nothing to do.
    fn sync_clock(&mut self, _now: Instant) {}
}
