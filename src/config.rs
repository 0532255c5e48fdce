//! Configuration
//!
//! Settings live in a TOML file at `$CUEPLAY_CONFIG`, or
//! `<config_dir>/cueplay/config.toml` when the variable is unset. A missing
//! file means defaults; missing fields take their default values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item};

use crate::player::CoordinatorSettings;
use crate::playlist::DEFAULT_DISCOVERY_NAMES;
use crate::schedule::TimeOfDay;
use crate::timecode::parse_time;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CUEPLAY_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub discovery: DiscoveryConfig,
    pub media: MediaConfig,
}

/// `[player]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Time of day the second entry should start at
    pub target_time: TimeOfDay,
    /// Progress poll interval while playing
    pub poll_interval_ms: u64,
    /// Keep playing after advancing on end of media
    pub auto_resume: bool,
    /// Arrow-key seek step in seconds
    pub seek_step_secs: f64,
    /// Timeline milestone marker (`M:SS` or `H:MM:SS`)
    pub milestone: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            target_time: TimeOfDay::default(),
            poll_interval_ms: 100,
            auto_resume: true,
            seek_step_secs: 5.0,
            milestone: "30:00".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Milestone position in seconds.
    pub fn milestone_seconds(&self) -> Result<f64> {
        let seconds = parse_time(&self.milestone)
            .with_context(|| format!("Invalid [player] milestone '{}'", self.milestone))?;
        Ok(seconds as f64)
    }

    /// Coordinator policies from this section.
    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            auto_resume: self.auto_resume,
        }
    }
}

/// `[discovery]` section: the fixed file list looked up at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub dir: PathBuf,
    pub names: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            names: DEFAULT_DISCOVERY_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `[media]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// ffprobe binary used to measure durations
    pub ffprobe: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffprobe: "ffprobe".to_string(),
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("cueplay").join("config.toml"))
    }

    /// Load the config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the config from `path`, falling back to defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save the config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct MigrateResult {
    /// Updated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist before
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add every field of the default config missing from `content`.
///
/// Existing values, comments and layout are kept as they are.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Failed to parse config file")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Failed to build default config")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        match doc.get_mut(section) {
            None => {
                doc.insert(section, Item::Table(default_table.clone()));
                sections_added.push(section.to_string());
                added_fields.extend(
                    default_table
                        .iter()
                        .map(|(key, _)| format!("{}.{}", section, key)),
                );
            }
            Some(existing) => {
                let Some(table) = existing.as_table_mut() else {
                    anyhow::bail!("Config entry '{}' must be a table", section);
                };
                for (key, value) in default_table.iter() {
                    if !table.contains_key(key) {
                        table.insert(key, value.clone());
                        added_fields.push(format!("{}.{}", section, key));
                    }
                }
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
