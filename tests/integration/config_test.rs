//! Integration tests for loading and migrating the config file

use std::fs;
use std::time::Duration;

use cueplay::config::migrate_config;
use cueplay::Config;

const OLD_CONFIG: &str = r#"# written by hand
[player]
target_time = "18:30"
auto_resume = false

[discovery]
dir = "/srv/videos"
"#;

#[test]
fn migrated_config_keeps_user_values() {
    let result = migrate_config(OLD_CONFIG).unwrap();
    assert!(result.has_changes());
    assert!(result.content.starts_with("# written by hand"));
    assert_eq!(result.sections_added, vec!["media".to_string()]);
    assert!(result.added_fields.contains(&"player.seek_step_secs".to_string()));
    assert!(result.added_fields.contains(&"discovery.names".to_string()));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, &result.content).unwrap();
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.player.target_time.to_string(), "18:30");
    assert!(!config.player.auto_resume);
    assert_eq!(config.discovery.dir.to_str(), Some("/srv/videos"));
    assert_eq!(config.media, Config::default().media);

    assert!(!migrate_config(&result.content).unwrap().has_changes());
}

#[test]
fn player_section_drives_coordinator_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[player]\npoll_interval_ms = 0\nmilestone = \"1:00:00\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    let settings = config.player.coordinator_settings();

    assert_eq!(settings.poll_interval, Duration::from_millis(1));
    assert!(settings.auto_resume);
    assert_eq!(config.player.milestone_seconds().unwrap(), 3600.0);
}

#[test]
fn broken_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[player\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.toml"));
}
