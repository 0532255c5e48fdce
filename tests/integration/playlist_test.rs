//! Integration tests for the playlist and the synchronized start

use std::path::Path;

use cueplay::playlist::DEFAULT_DISCOVERY_NAMES;
use cueplay::{PlaylistError, PlaylistState, SourceRef, TimeOfDay};

use super::helpers::wall;

fn measured(durations: &[f64]) -> PlaylistState {
    let mut playlist = PlaylistState::new(TimeOfDay::new(13, 0).unwrap());
    for (i, duration) in durations.iter().enumerate() {
        let name = format!("clip{}.mp4", i + 1);
        playlist.add_entry(SourceRef::Url(format!("https://cdn.example.com/{}", name)), name);
        playlist.update_duration(i, *duration).unwrap();
    }
    playlist
}

#[test]
fn lead_in_longer_than_wait_starts_part_way() {
    let mut playlist = measured(&[1800.0, 3600.0]);
    let plan = playlist.compute_synchronized_start_offset(wall(12, 55, 0));

    assert_eq!(plan.delta_seconds, 300.0);
    assert_eq!(plan.start_offset_seconds, 1500.0);
    assert!(!plan.finishes_early());
    assert_eq!(playlist.computed_start_offset(), 1500.0);
}

#[test]
fn lead_in_shorter_than_wait_starts_at_zero_and_ends_early() {
    let mut playlist = measured(&[600.0, 3600.0]);
    let plan = playlist.compute_synchronized_start_offset(wall(12, 0, 0));

    assert_eq!(plan.start_offset_seconds, 0.0);
    assert!(plan.finishes_early());
    assert_eq!(plan.early_by_seconds(), 3000.0);
}

#[test]
fn target_already_passed_rolls_to_tomorrow() {
    let mut playlist = measured(&[1800.0, 3600.0]);
    let now = wall(13, 0, 0);
    let plan = playlist.compute_synchronized_start_offset(now);

    assert!(plan.is_tomorrow(now));
    assert_eq!(plan.delta_seconds, 86_400.0);
    assert_eq!(plan.start_offset_seconds, 0.0);
}

#[test]
fn preview_does_not_cache() {
    let playlist = measured(&[1800.0, 3600.0]);
    let plan = playlist.preview_sync_plan(wall(12, 45, 0));

    assert_eq!(plan.start_offset_seconds, 900.0);
    assert_eq!(playlist.computed_start_offset(), 0.0);
}

#[test]
fn changing_target_changes_plan() {
    let mut playlist = measured(&[1800.0, 3600.0]);
    playlist.set_target_time_str("9:15").unwrap();
    let plan = playlist.compute_synchronized_start_offset(wall(9, 0, 0));

    assert_eq!(playlist.target().to_string(), "09:15");
    assert_eq!(plan.start_offset_seconds, 900.0);

    let err = playlist.set_target_time_str("9:75").unwrap_err();
    assert!(matches!(err, PlaylistError::InvalidTimeOfDay { .. }));
    assert_eq!(playlist.target().to_string(), "09:15");
}

#[test]
fn walking_the_playlist_stops_at_the_end() {
    let mut playlist = measured(&[60.0, 120.0, 30.0]);
    assert_eq!(playlist.total_duration(), 210.0);
    assert_eq!(playlist.active_index(), Some(0));

    assert_eq!(playlist.peek_next().unwrap().display_name, "clip2.mp4");
    playlist.advance().unwrap();
    playlist.advance().unwrap();
    assert_eq!(playlist.active_index(), Some(2));
    assert!(playlist.peek_next().is_none());
    assert!(playlist.advance().unwrap().is_none());
    assert_eq!(playlist.active_index(), Some(2));
}

#[test]
fn removing_entries_keeps_cursor_and_orders_consistent() {
    let mut playlist = measured(&[60.0, 120.0, 30.0]);
    playlist.set_active_index(2).unwrap();

    let removed = playlist.remove_entry(0).unwrap();
    assert_eq!(removed.display_name, "clip1.mp4");
    assert_eq!(playlist.active_entry().unwrap().display_name, "clip3.mp4");
    let orders: Vec<u32> = playlist.entries().iter().map(|e| e.order).collect();
    assert_eq!(orders, vec![1, 2]);
    assert_eq!(playlist.total_duration(), 150.0);

    playlist.remove_entry(1).unwrap();
    assert_eq!(playlist.active_index(), Some(0));
    playlist.remove_entry(0).unwrap();
    assert_eq!(playlist.active_index(), None);
    assert!(matches!(
        playlist.remove_entry(0),
        Err(PlaylistError::InvalidIndex { index: 0, len: 0 })
    ));
}

#[test]
fn discovery_replaces_added_entries() {
    let mut playlist = measured(&[60.0]);
    let replaced = playlist.discover(Path::new("/srv/videos"), DEFAULT_DISCOVERY_NAMES);

    assert_eq!(replaced.len(), 1);
    assert_eq!(playlist.len(), DEFAULT_DISCOVERY_NAMES.len());
    assert_eq!(playlist.total_duration(), 0.0);
    assert_eq!(playlist.entries()[0].id.as_str(), "video-1");
}
