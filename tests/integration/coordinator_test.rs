//! Integration tests for the playback coordinator driven by a clocked media
//! element

use std::time::{Duration, Instant};

use cueplay::media::{KnownDurations, MediaElement};
use cueplay::player::CoordinatorSettings;
use cueplay::PlaylistError;

use super::helpers::{url_player, video_dir, wall};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn plays_through_playlist_and_stops_at_end() {
    let start = Instant::now();
    let mut player = url_player(
        &[("a.mp4", 60.0), ("b.mp4", 120.0)],
        CoordinatorSettings::default(),
        start,
    );

    player.play(start).unwrap();
    player.pump(start);
    assert_eq!(player.duration(), 60.0);
    assert_eq!(player.loaded_index(), Some(0));

    let t = start + secs(61);
    player.media_mut().tick(t);
    player.pump(t);
    assert_eq!(player.loaded_index(), Some(1));
    assert!(player.is_playing());

    player.pump(t);
    assert_eq!(player.duration(), 120.0);

    let t = t + secs(121);
    player.media_mut().tick(t);
    player.pump(t);
    assert!(!player.is_playing());
    assert_eq!(player.loaded_index(), Some(1));
}

#[test]
fn without_auto_resume_next_entry_waits_paused() {
    let start = Instant::now();
    let settings = CoordinatorSettings {
        auto_resume: false,
        ..CoordinatorSettings::default()
    };
    let mut player = url_player(&[("a.mp4", 10.0), ("b.mp4", 10.0)], settings, start);

    player.play(start).unwrap();
    let t = start + secs(11);
    player.media_mut().tick(t);
    player.pump(t);

    assert_eq!(player.loaded_index(), Some(1));
    assert!(!player.is_playing());
    assert!(player.media().is_paused());
}

fn known(entries: &[(&str, f64)]) -> KnownDurations {
    let mut known = KnownDurations::new();
    for (name, duration) in entries {
        known.insert(*name, *duration);
    }
    known
}

#[test]
fn jump_starts_lead_in_at_offset() {
    let entries = [("lead.mp4", 1800.0), ("main.mp4", 3600.0)];
    let start = Instant::now();
    let mut player = url_player(&entries, CoordinatorSettings::default(), start);
    assert!(player.preload_metadata(&known(&entries)).is_empty());
    assert_eq!(player.playlist().total_duration(), 5400.0);

    let plan = player
        .jump_to_synchronized_start(wall(12, 55, 0), start)
        .unwrap()
        .expect("two entries");

    assert_eq!(plan.start_offset_seconds, 1500.0);
    assert_eq!(player.loaded_index(), Some(0));
    assert!(player.is_playing());
    assert_eq!(player.media().current_time(), 1500.0);
    assert_eq!(player.elapsed(), 1500.0);
    assert_eq!(player.playlist().computed_start_offset(), 1500.0);

    // Lead-in runs out exactly at the target and the main entry follows
    let t = start + secs(301);
    player.media_mut().tick(t);
    player.pump(t);
    assert_eq!(player.loaded_index(), Some(1));
    assert!(player.is_playing());
}

#[test]
fn jump_anchors_lead_in_at_the_key_press() {
    let entries = [("lead.mp4", 1800.0), ("main.mp4", 3600.0)];
    let start = Instant::now();
    let mut player = url_player(&entries, CoordinatorSettings::default(), start);
    player.preload_metadata(&known(&entries));
    player.media_mut().tick(start);

    // The loop last ticked the media well before the key arrived
    let pressed = start + Duration::from_millis(200);
    let plan = player
        .jump_to_synchronized_start(wall(12, 55, 0), pressed)
        .unwrap()
        .expect("two entries");
    player.media_mut().tick(pressed);

    assert_eq!(player.media().current_time(), plan.start_offset_seconds);

    // Lead-in ends exactly 300 s after the key press
    player.media_mut().tick(pressed + Duration::from_millis(299_900));
    player.pump(pressed + Duration::from_millis(299_900));
    assert_eq!(player.loaded_index(), Some(0));

    let end = pressed + secs(300);
    player.media_mut().tick(end);
    player.pump(end);
    assert_eq!(player.loaded_index(), Some(1));
}

#[test]
fn seek_while_playing_anchors_at_the_input_instant() {
    let start = Instant::now();
    let mut player = url_player(&[("a.mp4", 100.0)], CoordinatorSettings::default(), start);
    player.play(start).unwrap();
    player.pump(start);
    player.media_mut().tick(start + secs(10));

    let pressed = start + Duration::from_millis(10_200);
    player.seek_to(0.5, pressed);
    player.media_mut().tick(pressed);
    assert_eq!(player.media().current_time(), 50.0);

    let pressed = pressed + Duration::from_millis(150);
    player.seek_by(5.0, pressed);
    player.media_mut().tick(pressed);
    assert!((player.media().current_time() - 55.15).abs() < 1e-9);
}

#[test]
fn jump_from_second_entry_reloads_lead_in() {
    let entries = [("lead.mp4", 1800.0), ("main.mp4", 3600.0)];
    let start = Instant::now();
    let mut player = url_player(&entries, CoordinatorSettings::default(), start);
    player.preload_metadata(&known(&entries));
    player.select(1, start).unwrap();

    player
        .jump_to_synchronized_start(wall(12, 0, 0), start)
        .unwrap();

    assert_eq!(player.loaded_index(), Some(0));
    assert_eq!(player.media().current_time(), 0.0);
}

#[test]
fn jump_needs_two_entries() {
    let start = Instant::now();
    let mut player = url_player(&[("only.mp4", 60.0)], CoordinatorSettings::default(), start);

    let plan = player
        .jump_to_synchronized_start(wall(12, 55, 0), start)
        .unwrap();
    assert!(plan.is_none());
    assert!(!player.is_playing());
}

#[test]
fn seeking_is_clamped_to_media() {
    let start = Instant::now();
    let mut player = url_player(&[("a.mp4", 100.0)], CoordinatorSettings::default(), start);
    player.play(start).unwrap();
    player.pump(start);

    player.seek_to(0.25, start);
    assert_eq!(player.media().current_time(), 25.0);
    player.seek_by(-60.0, start);
    assert_eq!(player.elapsed(), 0.0);
    player.seek_by(500.0, start);
    assert_eq!(player.elapsed(), 100.0);
}

#[test]
fn progress_poll_only_runs_while_playing() {
    let start = Instant::now();
    let mut player = url_player(&[("a.mp4", 100.0)], CoordinatorSettings::default(), start);
    assert!(!player.is_ticking());

    player.play(start).unwrap();
    assert!(player.is_ticking());
    assert!(player.next_tick_in(start).is_some());

    player.pause();
    assert!(!player.is_ticking());
    assert!(player.next_tick_in(start).is_none());
}

#[test]
fn added_files_use_session_handles_released_on_remove() {
    let videos = video_dir(&["clip.mp4"]);
    let start = Instant::now();
    let mut player = url_player(&[], CoordinatorSettings::default(), start);

    let path = videos.path().join("clip.mp4");
    let err = player.add_file(&videos.path().join("missing.mp4"), start).unwrap_err();
    assert!(matches!(err, PlaylistError::MediaUnavailable { .. }));
    assert!(player.playlist().is_empty());

    // Loading fails without a known duration, but the entry is kept
    let _ = player.add_file(&path, start);
    assert_eq!(player.playlist().len(), 1);
    assert_eq!(player.session().live_handles(), 1);

    player.remove_entry(0, start).unwrap();
    assert!(player.playlist().is_empty());
    assert_eq!(player.session().live_handles(), 0);
}

#[test]
fn load_failure_is_reported_once() {
    let start = Instant::now();
    let mut player = url_player(&[("a.mp4", 60.0)], CoordinatorSettings::default(), start);
    player
        .add_source(
            cueplay::SourceRef::Url("https://cdn.example.com/unknown.mp4".into()),
            "unknown.mp4",
            start,
        )
        .unwrap();

    assert!(player.select(1, start).is_err());
    assert!(player.take_error().is_some());
    assert!(player.take_error().is_none());
    assert!(!player.is_playing());
}
