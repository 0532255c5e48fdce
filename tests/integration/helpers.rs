//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use assert_cmd::Command;
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use cueplay::media::{ClockedMedia, KnownDurations, MediaSession};
use cueplay::player::{CoordinatorSettings, PlaybackCoordinator};
use cueplay::{PlaylistState, SourceRef, TimeOfDay};

/// A fixed wall-clock moment on an ordinary day.
pub fn wall(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// Temp directory holding empty files with the given names.
pub fn video_dir(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for name in names {
        fs::write(dir.path().join(name), b"").expect("write video file");
    }
    dir
}

pub fn paths(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| dir.join(name)).collect()
}

/// Coordinator over URL entries with known durations.
pub fn url_player(
    entries: &[(&str, f64)],
    settings: CoordinatorSettings,
    now: Instant,
) -> PlaybackCoordinator<ClockedMedia> {
    let mut known = KnownDurations::new();
    let mut playlist = PlaylistState::new(TimeOfDay::default());
    for (name, duration) in entries {
        known.insert(*name, *duration);
        playlist.add_entry(SourceRef::Url(format!("https://cdn.example.com/{}", name)), *name);
    }
    PlaybackCoordinator::new(
        playlist,
        MediaSession::new(),
        ClockedMedia::new(known, now),
        settings,
    )
}

/// The cueplay binary with an isolated config file and no colors.
pub fn cueplay(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cueplay").expect("binary is built");
    cmd.env("CUEPLAY_CONFIG", config_dir.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("CUEPLAY_LOG");
    cmd
}
