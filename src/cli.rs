//! Command-line interface definition
//!
//! Lives in the library so `xtask` can generate man pages from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::schedule::TimeOfDay;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("CUEPLAY_BUILD_DATE"),
    ")"
);

/// Cue player - plays a video playlist so the second video starts at a
/// chosen time of day.
#[derive(Parser, Debug)]
#[command(name = "cueplay", version, long_version = LONG_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play the playlist in the terminal
    Play(PlayArgs),

    /// Print where to start the first video so the second begins at the target time
    Offset(OffsetArgs),

    /// List the playlist with durations and sizes
    List(ListArgs),

    /// Show or change the configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the playlist comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct PlaylistArgs {
    /// Video files in play order (default: the discovery list)
    pub files: Vec<PathBuf>,

    /// Directory searched for the discovery list
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Known duration of a file, e.g. video.mp4=30:00 (repeatable)
    #[arg(long = "duration", value_name = "NAME=TIMECODE")]
    pub durations: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub playlist: PlaylistArgs,

    /// Target time of day for the second video (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub target: Option<TimeOfDay>,

    /// Timeline milestone marker (M:SS or H:MM:SS)
    #[arg(long, value_name = "TIMECODE")]
    pub milestone: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct OffsetArgs {
    #[command(flatten)]
    pub playlist: PlaylistArgs,

    /// Target time of day for the second video (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub target: Option<TimeOfDay>,

    /// Compute as if it were this time today (HH:MM or HH:MM:SS)
    #[arg(long, value_name = "HH:MM[:SS]")]
    pub now: Option<String>,

    /// Duration of the first video, instead of measuring it (M:SS, H:MM:SS or seconds)
    #[arg(long, value_name = "TIMECODE")]
    pub lead_in: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub playlist: PlaylistArgs,

    /// Print the playlist as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Add missing fields to the configuration file
    Migrate {
        /// Apply without asking
        #[arg(long, short)]
        yes: bool,
    },
}
