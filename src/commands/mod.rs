//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod list;
pub mod offset;
pub mod play;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::warn;

use cueplay::cli::PlaylistArgs;
use cueplay::media::{ClockedMedia, Ffprobe, KnownDurations, MediaSession, ProbeChain};
use cueplay::player::PlaybackCoordinator;
use cueplay::{Config, PlaylistState, SourceRef, TimeOfDay};

/// Durations given with `--duration`, then ffprobe.
pub fn duration_probe(args: &PlaylistArgs, config: &Config) -> Result<ProbeChain> {
    let mut known = KnownDurations::new();
    for spec in &args.durations {
        known
            .insert_spec(spec)
            .with_context(|| format!("Invalid --duration '{}'", spec))?;
    }
    Ok(ProbeChain::new()
        .with(known)
        .with(Ffprobe::new(config.media.ffprobe.clone())))
}

/// The playlist named on the command line, or the discovery list.
pub fn load_playlist(args: &PlaylistArgs, config: &Config, target: TimeOfDay) -> PlaylistState {
    let mut playlist = PlaylistState::new(target);
    if args.files.is_empty() {
        let dir = args.dir.as_deref().unwrap_or(&config.discovery.dir);
        playlist.discover(dir, &config.discovery.names);
    } else {
        for file in &args.files {
            let (source, name) = source_for(file);
            playlist.add_entry(source, name);
        }
    }
    playlist
}

/// URLs stay URLs; everything else is a local path.
fn source_for(file: &Path) -> (SourceRef, String) {
    let text = file.to_string_lossy();
    if text.starts_with("http://") || text.starts_with("https://") {
        let name = text
            .rsplit('/')
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or(&text)
            .to_string();
        return (SourceRef::Url(text.into_owned()), name);
    }
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| text.into_owned());
    (SourceRef::Path(file.to_path_buf()), name)
}

/// A coordinator over the requested playlist with durations measured.
pub fn build_player(
    args: &PlaylistArgs,
    config: &Config,
    target: TimeOfDay,
) -> Result<PlaybackCoordinator<ClockedMedia>> {
    let playlist = load_playlist(args, config, target);
    let media = ClockedMedia::new(duration_probe(args, config)?, Instant::now());
    let mut player = PlaybackCoordinator::new(
        playlist,
        MediaSession::new(),
        media,
        config.player.coordinator_settings(),
    );

    let probe = duration_probe(args, config)?;
    for error in player.preload_metadata(&probe) {
        warn!(%error, "could not measure duration");
    }
    Ok(player)
}
