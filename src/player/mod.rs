//! Terminal playlist player
//!
//! Plays a playlist of videos and starts the first one at the offset that
//! makes the second begin at the target time of day.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `coordinator`: binds the playlist to one media element (load, advance, jump)
//! - `ticker`: cancellable progress poll schedule
//! - `state`: ViewState struct and shared types (MarkerPosition, InputResult)
//! - `input/`: Keyboard and mouse input handling
//! - `render/`: UI rendering (playlist, progress bar, status bar, help)
//! - `native`: the terminal loop tying them together
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Instant;
//! use cueplay::media::{ClockedMedia, Ffprobe, MediaSession};
//! use cueplay::player::{play_playlist, CoordinatorSettings, PlaybackCoordinator, PlayerOptions};
//! use cueplay::playlist::{PlaylistState, DEFAULT_DISCOVERY_NAMES};
//! use cueplay::schedule::SystemClock;
//!
//! let mut playlist = PlaylistState::default();
//! playlist.discover(Path::new("."), DEFAULT_DISCOVERY_NAMES);
//! let media = ClockedMedia::new(Ffprobe::default(), Instant::now());
//! let mut player = PlaybackCoordinator::new(
//!     playlist,
//!     MediaSession::new(),
//!     media,
//!     CoordinatorSettings::default(),
//! );
//! let options = PlayerOptions { seek_step: 5.0, milestone: 1800.0 };
//! let result = play_playlist(&mut player, &options, &SystemClock).unwrap();
//! println!("Stopped at {:?}", result.last_entry);
//! ```

pub mod coordinator;
pub(crate) mod input;
mod native;
pub mod render;
pub mod state;
pub mod ticker;

pub use coordinator::{CoordinatorSettings, PlaybackCoordinator};
pub use native::{play_playlist, PlaybackResult, PlayerOptions};
pub use state::{InputResult, MarkerPosition, ViewState};
pub use ticker::ProgressTicker;
