//! Playlist entry types.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::media::SessionKey;

/// Opaque, stable identifier of a playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

/// Distinguishes ids of entries added within the same millisecond.
static NEXT_ADDED: AtomicU64 = AtomicU64::new(1);

impl EntryId {
    /// Id for the `n`th (1-based) discovered entry.
    pub(crate) fn discovered(n: usize) -> Self {
        Self(format!("video-{}", n))
    }

    /// Fresh id for a user-added entry.
    pub(crate) fn added() -> Self {
        let seq = NEXT_ADDED.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("uploaded-{}-{}", millis, seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle the media layer resolves into playable media.
///
/// The playlist never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRef {
    /// A file at a known location
    Path(PathBuf),
    /// A remote or otherwise opaque locator
    Url(String),
    /// A session-scoped handle created for a user-added file
    Session(SessionKey),
}

impl SourceRef {
    /// The session handle, if this source is session-scoped.
    pub fn session_key(&self) -> Option<SessionKey> {
        match self {
            Self::Session(key) => Some(*key),
            _ => None,
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Session(key) => write!(f, "{}", key),
        }
    }
}

/// One playable video tracked by the playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEntry {
    pub id: EntryId,
    pub display_name: String,
    pub source: SourceRef,
    /// Duration in seconds; zero until media metadata reports it
    pub duration_seconds: f64,
    /// 1-based display number; sequencing follows list position
    pub order: u32,
}

impl VideoEntry {
    /// Whether the duration has been measured yet.
    pub fn has_duration(&self) -> bool {
        self.duration_seconds > 0.0
    }
}
