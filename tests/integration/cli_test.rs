//! End-to-end tests of the cueplay binary

use predicates::prelude::*;
use serde_json::Value;

use super::helpers::{cueplay, paths, video_dir};

#[test]
fn offset_starts_lead_in_part_way_through() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["offset", "--target", "13:00", "--now", "12:55", "--lead-in", "30:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Start video 1 at 25:00 so video 2 begins at 13:00.",
        ));
}

#[test]
fn offset_lead_in_accepts_bare_seconds() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["offset", "--target", "13:00", "--now", "12:55", "--lead-in", "1800"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start video 1 at 25:00"));
}

#[test]
fn offset_after_target_rolls_to_tomorrow() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["offset", "--target", "13:00", "--now", "13:05", "--lead-in", "30:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start video 1 at 0:00"))
        .stdout(predicate::str::contains("tomorrow"))
        .stdout(predicate::str::contains("before the target time"));
}

#[test]
fn offset_json_reports_plan() {
    let config = tempfile::tempdir().unwrap();
    let output = cueplay(&config)
        .args([
            "offset", "--target", "13:00", "--now", "12:55", "--lead-in", "30:00", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["target"], "13:00");
    assert_eq!(json["start_offset_seconds"], 1500.0);
    assert_eq!(json["delta_seconds"], 300.0);
    assert_eq!(json["start_offset"], "25:00");
    assert_eq!(json["finishes_early"], false);
    assert_eq!(json["tomorrow"], false);
}

#[test]
fn offset_measures_lead_in_from_playlist() {
    let config = tempfile::tempdir().unwrap();
    let videos = video_dir(&["intro.mp4", "main.mp4"]);
    let files = paths(videos.path(), &["intro.mp4", "main.mp4"]);

    cueplay(&config)
        .arg("offset")
        .args(&files)
        .args(["--duration", "intro.mp4=20:00", "--duration", "main.mp4=1:00:00"])
        .args(["--target", "13:00", "--now", "12:50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start video 1 at 10:00"));
}

#[test]
fn offset_uses_target_from_config() {
    let config = tempfile::tempdir().unwrap();
    std::fs::write(
        config.path().join("config.toml"),
        "[player]\ntarget_time = \"09:30\"\n",
    )
    .unwrap();

    cueplay(&config)
        .args(["offset", "--now", "09:00", "--lead-in", "45:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("at 15:00 so video 2 begins at 09:30"));
}

#[test]
fn invalid_target_is_a_usage_error() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["offset", "--target", "25:00", "--lead-in", "1:00"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("25:00"));
}

#[test]
fn invalid_now_fails() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["offset", "--now", "lunch", "--lead-in", "1:00"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid --now"));
}

#[test]
fn list_shows_durations_and_roles() {
    let config = tempfile::tempdir().unwrap();
    let videos = video_dir(&["intro.mp4", "main.mp4"]);
    let files = paths(videos.path(), &["intro.mp4", "main.mp4"]);

    cueplay(&config)
        .arg("list")
        .args(&files)
        .args(["--duration", "intro.mp4=30:00", "--duration", "main.mp4=1:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("intro.mp4"))
        .stdout(predicate::str::contains("lead-in"))
        .stdout(predicate::str::contains("target"))
        .stdout(predicate::str::contains("total 1:30:00"));
}

#[test]
fn list_json_has_one_item_per_file() {
    let config = tempfile::tempdir().unwrap();
    let videos = video_dir(&["a.mp4", "b.mp4", "c.mp4"]);
    let files = paths(videos.path(), &["a.mp4", "b.mp4", "c.mp4"]);

    let output = cueplay(&config)
        .arg("list")
        .args(&files)
        .args(["--duration", "a.mp4=90", "--duration", "b.mp4=60", "--duration", "c.mp4=30"])
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["order"], 1);
    assert_eq!(entries[2]["name"], "c.mp4");
    assert_eq!(entries[2]["role"], Value::Null);
    assert_eq!(json["total_seconds"], 180.0);
}

#[test]
fn completions_are_generated() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cueplay"));
}

#[test]
fn config_show_prints_defaults() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[player]"))
        .stdout(predicate::str::contains("target_time = \"13:00\""));
}

#[test]
fn config_migrate_with_yes_writes_file() {
    let config = tempfile::tempdir().unwrap();
    cueplay(&config)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success();

    let written = std::fs::read_to_string(config.path().join("config.toml")).unwrap();
    assert!(written.contains("[discovery]"));
    assert!(written.contains("seek_step_secs"));
}
