//! cueplay - synchronized-start video playlist player
//!
//! Keeps an ordered playlist of videos, plays them back to back, and can
//! start the first video part-way through so that the second one begins
//! exactly at a chosen time of day.
//!
//! - [`playlist`]: entries, the active cursor, durations and the target time
//! - [`schedule`]: wall-clock arithmetic for the synchronized start
//! - [`media`]: media elements, duration probes, session-scoped files
//! - [`player`]: the playback coordinator and the terminal player

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod player;
pub mod playlist;
pub mod schedule;
pub mod theme;
pub mod timecode;

pub use config::Config;
pub use error::{PlaylistError, Result};
pub use playlist::{PlaylistState, SourceRef, VideoEntry};
pub use schedule::{SyncPlan, TimeOfDay};
pub use theme::current_theme;
