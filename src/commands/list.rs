//! List command handler

use std::fs;

use anyhow::Result;
use serde::Serialize;

use cueplay::cli::ListArgs;
use cueplay::player::render::entry_label;
use cueplay::timecode::format_time;
use cueplay::{current_theme, Config, PlaylistState, SourceRef};

/// One playlist row.
#[derive(Debug, Serialize)]
pub struct ListItem {
    pub order: u32,
    pub name: String,
    pub source: String,
    pub duration_seconds: f64,
    pub duration: Option<String>,
    pub size_bytes: Option<u64>,
    pub role: Option<&'static str>,
}

/// JSON shape of the list output.
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub target: String,
    pub entries: Vec<ListItem>,
    pub total_seconds: f64,
    pub total: String,
}

pub fn build_report(playlist: &PlaylistState) -> ListReport {
    let entries = playlist
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| ListItem {
            order: entry.order,
            name: entry.display_name.clone(),
            source: entry.source.to_string(),
            duration_seconds: entry.duration_seconds,
            duration: entry
                .has_duration()
                .then(|| format_time(entry.duration_seconds)),
            size_bytes: match &entry.source {
                SourceRef::Path(path) => fs::metadata(path).ok().map(|m| m.len()),
                _ => None,
            },
            role: entry_label(index),
        })
        .collect();

    ListReport {
        target: playlist.target().to_string(),
        entries,
        total_seconds: playlist.total_duration(),
        total: format_time(playlist.total_duration()),
    }
}

/// Print the playlist.
pub fn handle(args: &ListArgs, config: &Config) -> Result<()> {
    let player = super::build_player(&args.playlist, config, config.player.target_time)?;
    let report = build_report(player.playlist());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn print_report(report: &ListReport) {
    let theme = current_theme();
    if report.entries.is_empty() {
        println!("{}", theme.secondary_text("The playlist is empty."));
        return;
    }

    let name_width = report
        .entries
        .iter()
        .map(|e| unicode_width::UnicodeWidthStr::width(e.name.as_str()))
        .max()
        .unwrap_or(0);

    for item in &report.entries {
        let pad = name_width - unicode_width::UnicodeWidthStr::width(item.name.as_str());
        let duration = item.duration.as_deref().unwrap_or("--:--");
        let size = match item.size_bytes {
            Some(bytes) => humansize::format_size(bytes, humansize::BINARY),
            None if item.source.contains("://") => "remote".to_string(),
            None => "missing".to_string(),
        };
        let role = item.role.map(|r| format!("  {}", r)).unwrap_or_default();
        println!(
            "{:>3}. {}{}  {:>8}  {:>10}{}",
            item.order,
            theme.primary_text(&item.name),
            " ".repeat(pad),
            duration,
            theme.secondary_text(&size),
            theme.accent_text(&role)
        );
    }
    println!();
    println!(
        "{}",
        theme.secondary_text(&format!(
            "{} video(s), total {}, target {}",
            report.entries.len(),
            report.total,
            report.target
        ))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use cueplay::TimeOfDay;

    #[test]
    fn report_lists_sizes_durations_and_roles() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("video.mp4"), vec![0u8; 2048]).unwrap();

        let mut playlist = PlaylistState::new(TimeOfDay::default());
        playlist.discover(dir.path(), &["video.mp4", "video2.mp4"]);
        playlist.update_duration(0, 1800.0).unwrap();

        let report = build_report(&playlist);

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].size_bytes, Some(2048));
        assert_eq!(report.entries[0].duration.as_deref(), Some("30:00"));
        assert_eq!(report.entries[0].role, Some("lead-in"));
        assert_eq!(report.entries[1].size_bytes, None);
        assert_eq!(report.entries[1].duration, None);
        assert_eq!(report.entries[1].role, Some("target"));
        assert_eq!(report.total, "30:00");
        assert_eq!(report.target, "13:00");
    }
}
