//! Rendering components for the native player.
//!
//! This module contains all the UI rendering functions for the player,
//! including the playlist panel, progress bar, status bar and help overlay.
//! Every line is built as one string and written in a single call.

mod help;
mod playlist;
mod progress;
mod status;

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use crossterm::style::Color;
use unicode_width::UnicodeWidthChar;

use crate::media::MediaElement;
use crate::player::coordinator::PlaybackCoordinator;
use crate::player::state::ViewState;
use crate::theme::Theme;

pub use help::{calc_help_start_col, calc_help_start_row, render_help, HELP_BOX_WIDTH, HELP_LINES};
pub use playlist::{entry_label, playlist_window, render_header, render_playlist};
pub use progress::{build_progress_bar_chars, render_progress_bar, timeline_width, TIMELINE_START};
pub use status::{count_digits, render_message_line, render_separator_line, render_status_bar};

/// Truncate `text` to at most `max` terminal columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let full: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if full <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Builds one full-width terminal line from colored segments.
///
/// Tracks the visible width so the line can be padded to overwrite leftover
/// content, and drops anything past the terminal width.
pub(crate) struct LineBuilder<'a> {
    theme: &'a Theme,
    output: String,
    visible: usize,
    width: usize,
}

impl<'a> LineBuilder<'a> {
    pub(crate) fn new(theme: &'a Theme, row: u16, width: u16) -> Self {
        let mut output = String::with_capacity(width as usize * 4);
        output.push_str(&format!("\x1b[{};1H", row + 1));
        Self {
            theme,
            output,
            visible: 0,
            width: width as usize,
        }
    }

    pub(crate) fn push(&mut self, color: Color, text: &str) -> &mut Self {
        let room = self.width.saturating_sub(self.visible);
        if room == 0 {
            return self;
        }
        let text = truncate_to_width(text, room);
        self.visible += text.chars().map(|c| c.width().unwrap_or(0)).sum::<usize>();
        self.output.push_str(self.theme.fg(color));
        self.output.push_str(&text);
        self
    }

    /// Emit a raw escape sequence that takes no columns.
    pub(crate) fn raw(&mut self, sequence: &str) -> &mut Self {
        if self.theme.colored {
            self.output.push_str(sequence);
        }
        self
    }

    pub(crate) fn visible_width(&self) -> usize {
        self.visible
    }

    pub(crate) fn finish(mut self) -> String {
        let padding = self.width.saturating_sub(self.visible);
        self.output.extend(std::iter::repeat(' ').take(padding));
        self.output.push_str(self.theme.reset());
        self.output
    }
}

/// Draw a complete frame.
pub fn render_frame<W: Write, M: MediaElement>(
    out: &mut W,
    theme: &Theme,
    view: &ViewState,
    player: &PlaybackCoordinator<M>,
    wall_now: NaiveDateTime,
) -> Result<()> {
    if view.show_help {
        render_help(out, theme, view.term_cols, view.term_rows)?;
        out.flush()?;
        return Ok(());
    }

    let cols = view.term_cols;
    let rows = view.term_rows;

    render_header(out, theme, cols, player.playlist(), wall_now)?;
    render_playlist(
        out,
        theme,
        cols,
        ViewState::PLAYLIST_TOP,
        view.playlist_rows(),
        player.playlist(),
        player.loaded_index(),
        player.is_playing(),
    )?;

    if rows > ViewState::STATUS_LINES {
        render_message_line(
            out,
            theme,
            cols,
            view.message_row(),
            view.prompt.as_ref(),
            view.message.as_ref(),
        )?;
        render_separator_line(out, theme, cols, rows - 3)?;
    }
    if rows >= 2 {
        render_progress_bar(
            out,
            theme,
            cols,
            view.progress_row(),
            player.elapsed(),
            player.duration(),
            &view.markers(),
        )?;
    }
    if rows >= 1 {
        let position = player.loaded_index().map(|i| (i + 1, player.playlist().len()));
        render_status_bar(out, theme, cols, rows - 1, player.is_playing(), position)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("video.mp4", 20), "video.mp4");
        assert_eq!(truncate_to_width("video.mp4", 9), "video.mp4");
    }

    #[test]
    fn truncate_cuts_with_ellipsis() {
        assert_eq!(truncate_to_width("video.mp4", 6), "video…");
        assert_eq!(truncate_to_width("video.mp4", 1), "…");
        assert_eq!(truncate_to_width("video.mp4", 0), "");
    }

    #[test]
    fn truncate_counts_wide_characters() {
        // Each CJK character takes two columns
        assert_eq!(truncate_to_width("動画ファイル", 5), "動画…");
    }

    #[test]
    fn line_builder_pads_to_width() {
        let theme = Theme::plain();
        let mut line = LineBuilder::new(&theme, 0, 10);
        line.push(Color::Grey, "abc");
        assert_eq!(line.visible_width(), 3);
        assert_eq!(line.finish(), "\x1b[1;1Habc       ");
    }

    #[test]
    fn line_builder_drops_overflow() {
        let theme = Theme::plain();
        let mut line = LineBuilder::new(&theme, 4, 5);
        line.push(Color::Grey, "abc").push(Color::Grey, "defgh");
        assert_eq!(line.visible_width(), 5);
        assert_eq!(line.finish(), "\x1b[5;1Habcd…");
    }
}
