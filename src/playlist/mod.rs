//! Playlist state model
//!
//! An ordered list of video entries, the active position, and the target
//! time of day the second entry should start at.
//!
//! - `entry`: `VideoEntry`, `EntryId`, `SourceRef`
//! - `state`: `PlaylistState` and its mutations

mod entry;
mod state;

pub use entry::{EntryId, SourceRef, VideoEntry};
pub use state::{PlaylistState, DEFAULT_DISCOVERY_NAMES};
