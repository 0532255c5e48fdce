//! Input handling for the native player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use std::time::Instant;

use crossterm::event::Event;

use crate::media::MediaElement;
use crate::player::coordinator::PlaybackCoordinator;
use crate::player::state::{InputResult, ViewState};
use crate::schedule::Clock;

/// Everything besides the player and view that a handler needs.
pub struct InputContext<'a> {
    /// Wall clock used for the synchronized start
    pub clock: &'a dyn Clock,
    /// Monotonic time of the event
    pub now: Instant,
    /// Seconds moved by the arrow keys
    pub seek_step: f64,
}

/// Handle any input event, dispatching to the appropriate handler.
pub fn handle_event<M: MediaElement>(
    event: Event,
    view: &mut ViewState,
    player: &mut PlaybackCoordinator<M>,
    ctx: &InputContext<'_>,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, view, player, ctx),
        Event::Mouse(mouse) => handle_mouse_event(mouse, view, player, ctx),
        Event::Resize(new_cols, new_rows) => {
            view.handle_resize(new_cols, new_rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}
