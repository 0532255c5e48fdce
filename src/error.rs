//! Playlist and playback errors.

/// Errors raised by playlist mutations, time parsing and media resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaylistError {
    #[error("Index {index} is out of range for a playlist of {len} entries")]
    InvalidIndex { index: usize, len: usize },

    #[error("Invalid time of day '{input}': expected HH:MM")]
    InvalidTimeOfDay { input: String },

    #[error("Invalid timecode '{input}': expected M:SS or H:MM:SS")]
    InvalidTimecode { input: String },

    #[error("Media unavailable: {source_name}: {reason}")]
    MediaUnavailable { source_name: String, reason: String },
}

impl PlaylistError {
    /// Build a `MediaUnavailable` error.
    pub fn media_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MediaUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for playlist and media operations.
pub type Result<T> = std::result::Result<T, PlaylistError>;
