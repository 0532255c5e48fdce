//! Session-scoped media handles.
//!
//! Files the user adds during a session get a `SessionKey` instead of being
//! referenced directly. The `MediaSession` owns every key: a handle lives
//! until its entry is removed or replaced, and all remaining handles are
//! released when the session is dropped.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PlaylistError, Result};
use crate::media::MediaLocator;
use crate::playlist::SourceRef;

/// Key of a session-scoped media handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionKey(u64);

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

#[derive(Debug)]
struct SessionMedia {
    path: PathBuf,
}

/// Owner of all session-scoped media handles.
#[derive(Debug, Default)]
pub struct MediaSession {
    next_key: u64,
    handles: BTreeMap<SessionKey, SessionMedia>,
}

impl MediaSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle for a user-selected file.
    ///
    /// Fails with `MediaUnavailable` if the file cannot be read.
    pub fn register(&mut self, path: &Path) -> Result<SourceRef> {
        let meta = std::fs::metadata(path)
            .map_err(|e| PlaylistError::media_unavailable(path.display().to_string(), e.to_string()))?;
        if !meta.is_file() {
            return Err(PlaylistError::media_unavailable(
                path.display().to_string(),
                "not a regular file",
            ));
        }
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        self.next_key += 1;
        let key = SessionKey(self.next_key);
        debug!(%key, path = %path.display(), "registered session media");
        self.handles.insert(key, SessionMedia { path });
        Ok(SourceRef::Session(key))
    }

    /// Resolve a source into something a media element can load.
    pub fn resolve(&self, source: &SourceRef) -> Result<MediaLocator> {
        match source {
            SourceRef::Path(path) => {
                if path.is_file() {
                    Ok(MediaLocator::File(path.clone()))
                } else {
                    Err(PlaylistError::media_unavailable(
                        path.display().to_string(),
                        "file not found",
                    ))
                }
            }
            SourceRef::Url(url) => Ok(MediaLocator::Url(url.clone())),
            SourceRef::Session(key) => match self.handles.get(key) {
                Some(media) if media.path.is_file() => Ok(MediaLocator::File(media.path.clone())),
                Some(media) => Err(PlaylistError::media_unavailable(
                    media.path.display().to_string(),
                    "file no longer exists",
                )),
                None => Err(PlaylistError::media_unavailable(
                    key.to_string(),
                    "session handle was released",
                )),
            },
        }
    }

    /// Release the handle behind `source`, if it has one.
    ///
    /// Returns whether a live handle was released.
    pub fn release(&mut self, source: &SourceRef) -> bool {
        let Some(key) = source.session_key() else {
            return false;
        };
        match self.handles.remove(&key) {
            Some(media) => {
                debug!(%key, path = %media.path.display(), "released session media");
                true
            }
            None => {
                warn!(%key, "release of unknown session handle");
                false
            }
        }
    }

    /// Number of handles currently held.
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for MediaSession {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            debug!(count = self.handles.len(), "releasing session media on teardown");
            self.handles.clear();
        }
    }
}
