//! Playlist panel and header rendering.

use std::io::Write;
use std::ops::Range;

use anyhow::Result;
use chrono::NaiveDateTime;

use super::LineBuilder;
use crate::playlist::PlaylistState;
use crate::theme::Theme;
use crate::timecode::format_time;

/// Width of the right-aligned duration column.
const DURATION_COLUMN: usize = 9;
/// Width of the role label column.
const LABEL_COLUMN: usize = 9;

/// Role of an entry in the synchronized start, by playlist position.
pub fn entry_label(index: usize) -> Option<&'static str> {
    match index {
        0 => Some("lead-in"),
        1 => Some("target"),
        _ => None,
    }
}

/// Entries visible in a panel of `rows` lines, keeping the active one in view.
pub fn playlist_window(len: usize, active: Option<usize>, rows: usize) -> Range<usize> {
    if rows == 0 {
        return 0..0;
    }
    if len <= rows {
        return 0..len;
    }
    let active = active.unwrap_or(0).min(len - 1);
    let start = active.saturating_sub(rows / 2).min(len - rows);
    start..start + rows
}

/// Render the two header rows.
///
/// The first shows the wall clock, target time, total duration, the last
/// computed offset and the next entry; the second previews the synchronized
/// start for the current moment.
pub fn render_header<W: Write>(
    out: &mut W,
    theme: &Theme,
    width: u16,
    playlist: &PlaylistState,
    wall_now: NaiveDateTime,
) -> Result<()> {
    let mut title = LineBuilder::new(theme, 0, width);
    title
        .push(theme.accent, " cueplay")
        .push(theme.text_secondary, "  ⏱ ")
        .push(theme.text_primary, &wall_now.format("%H:%M:%S").to_string())
        .push(theme.text_secondary, "  │ target ")
        .push(theme.text_primary, &playlist.target().to_string())
        .push(theme.text_secondary, "  │ total ")
        .push(theme.text_primary, &format_time(playlist.total_duration()))
        .push(theme.text_secondary, "  │ last offset ")
        .push(theme.text_primary, &format_time(playlist.computed_start_offset()));
    if let Some(next) = playlist.peek_next() {
        title
            .push(theme.text_secondary, "  │ next ")
            .push(theme.text_primary, &next.display_name);
    }
    write!(out, "{}", title.finish())?;

    let mut sync = LineBuilder::new(theme, 1, width);
    if playlist.len() < 2 {
        sync.push(
            theme.text_secondary,
            " Add a second video to schedule a synchronized start",
        );
    } else {
        let plan = playlist.preview_sync_plan(wall_now);
        sync.push(theme.text_secondary, " start video 1 at ")
            .push(theme.accent, &format_time(plan.start_offset_seconds))
            .push(theme.text_secondary, " · video 2 in ")
            .push(theme.text_primary, &format_time(plan.delta_seconds));
        if plan.is_tomorrow(wall_now) {
            sync.push(theme.text_secondary, " (tomorrow)");
        }
        if !playlist.entries()[0].has_duration() {
            sync.push(theme.error, " · lead-in duration unknown");
        } else if plan.finishes_early() {
            sync.push(
                theme.error,
                &format!(" · lead-in ends {} early", format_time(plan.early_by_seconds())),
            );
        }
    }
    write!(out, "{}", sync.finish())?;
    Ok(())
}

/// Render the playlist panel.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `top` - First row of the panel (0-indexed)
/// * `rows` - Number of rows the panel may use
/// * `playlist` - Playlist to show
/// * `loaded` - Index of the entry whose media is loaded
/// * `playing` - Whether playback is running
#[allow(clippy::too_many_arguments)]
pub fn render_playlist<W: Write>(
    out: &mut W,
    theme: &Theme,
    width: u16,
    top: u16,
    rows: usize,
    playlist: &PlaylistState,
    loaded: Option<usize>,
    playing: bool,
) -> Result<()> {
    let active = playlist.active_index();
    let window = playlist_window(playlist.len(), active, rows);
    let number_width = super::count_digits(playlist.len());
    // " ▶ " + "N. " + name + duration + label
    let name_width = (width as usize)
        .saturating_sub(3 + number_width + 2 + DURATION_COLUMN + LABEL_COLUMN)
        .max(1);

    let mut output = String::new();
    for slot in 0..rows {
        let row = top + slot as u16;
        let mut line = LineBuilder::new(theme, row, width);
        let index = window.start + slot;

        match playlist.get(index).filter(|_| window.contains(&index)) {
            Some(entry) => {
                let is_active = active == Some(index);
                let marker = match (is_active, loaded == Some(index) && playing) {
                    (true, true) => " ⏵ ",
                    (true, false) => " ▶ ",
                    _ => "   ",
                };
                let name_color = if is_active {
                    theme.accent
                } else {
                    theme.text_primary
                };
                let duration = if entry.has_duration() {
                    format_time(entry.duration_seconds)
                } else {
                    "--:--".to_string()
                };
                let name = super::truncate_to_width(&entry.display_name, name_width);
                let name_pad = name_width.saturating_sub(unicode_width::UnicodeWidthStr::width(
                    name.as_str(),
                ));

                line.push(theme.accent, marker)
                    .push(
                        theme.text_secondary,
                        &format!("{:>w$}. ", entry.order, w = number_width),
                    )
                    .push(name_color, &name)
                    .push(theme.text_primary, &" ".repeat(name_pad))
                    .push(
                        theme.text_secondary,
                        &format!("{:>w$}", duration, w = DURATION_COLUMN),
                    );
                if let Some(label) = entry_label(index) {
                    line.push(theme.marker, &format!("  {}", label));
                }
            }
            None if slot == 0 && playlist.is_empty() => {
                line.push(
                    theme.text_secondary,
                    "   No videos. Press a to add a file.",
                );
            }
            None => {}
        }
        output.push_str(&line.finish());
    }

    write!(out, "{}", output)?;
    Ok(())
}
