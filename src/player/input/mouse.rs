//! Mouse input handling for the native player.
//!
//! Left click on the progress bar seeks to that position; left click on a
//! playlist row selects that entry.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::InputContext;
use crate::media::MediaElement;
use crate::player::coordinator::PlaybackCoordinator;
use crate::player::render::{playlist_window, TIMELINE_START};
use crate::player::state::{InputResult, ViewState};

/// Handle a mouse event.
pub fn handle_mouse_event<M: MediaElement>(
    mouse: MouseEvent,
    view: &mut ViewState,
    player: &mut PlaybackCoordinator<M>,
    ctx: &InputContext<'_>,
) -> InputResult {
    if view.show_help || view.prompt.is_some() {
        return InputResult::Continue;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return InputResult::Continue;
    }

    if mouse.row == view.progress_row() {
        if let Some(fraction) = click_fraction(mouse.column, view.bar_width()) {
            player.seek_to(fraction, ctx.now);
            view.needs_render = true;
        }
    } else if let Some(index) = clicked_entry(mouse.row, view, player.playlist()) {
        if let Err(e) = player.select(index, ctx.now) {
            view.error(e.to_string());
        }
        view.needs_render = true;
    }

    InputResult::Continue
}

/// Normalized timeline position of a click at `column`, if it hit the bar.
fn click_fraction(column: u16, bar_width: usize) -> Option<f64> {
    if bar_width == 0 || column < TIMELINE_START {
        return None;
    }
    let offset = (column - TIMELINE_START) as usize;
    if offset >= bar_width {
        return None;
    }
    Some(offset as f64 / bar_width as f64)
}

/// Playlist entry shown on terminal `row`, if any.
fn clicked_entry(row: u16, view: &ViewState, playlist: &crate::playlist::PlaylistState) -> Option<usize> {
    let slot = row.checked_sub(ViewState::PLAYLIST_TOP)? as usize;
    let window = playlist_window(playlist.len(), playlist.active_index(), view.playlist_rows());
    let index = window.start + slot;
    window.contains(&index).then_some(index)
}
