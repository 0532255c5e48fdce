//! Native terminal player loop.
//!
//! Runs in the alternate screen with raw input and mouse capture. Each pass
//! advances the media clock, drains media events into the coordinator,
//! redraws when something changed, and waits for input no longer than the
//! next progress tick.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Timelike;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::{debug, info};

use super::coordinator::PlaybackCoordinator;
use super::input::{handle_event, InputContext};
use super::render::render_frame;
use super::state::{InputResult, ViewState};
use crate::media::ClockedMedia;
use crate::schedule::{Clock, TimeOfDay};
use crate::theme::current_theme;

/// Longest wait for input, so the media clock keeps moving.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Presentation options for the player.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Seconds moved by the arrow keys
    pub seek_step: f64,
    /// Initial milestone marker position in seconds
    pub milestone: f64,
}

/// How a player session ended.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackResult {
    /// Display name of the entry that was active on exit
    pub last_entry: Option<String>,
    /// Target time in effect on exit
    pub target: TimeOfDay,
    /// Last computed synchronized start offset
    pub computed_start_offset: f64,
}

/// Restores the terminal on every exit path, including panics.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Play the playlist in the terminal until the user quits.
pub fn play_playlist(
    player: &mut PlaybackCoordinator<ClockedMedia>,
    options: &PlayerOptions,
    clock: &dyn Clock,
) -> Result<PlaybackResult> {
    let mut stdout = io::stdout();
    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
    let mut view = ViewState::new(cols, rows, options.milestone);
    let theme = current_theme();

    info!(entries = player.playlist().len(), target = %player.playlist().target(), "player started");
    let _guard = TerminalGuard::enter(&mut stdout)?;

    if player.loaded_index().is_none() {
        if let Err(e) = player.load_active(Instant::now()) {
            view.error(e.to_string());
        }
    }

    let mut shown_second = None;
    loop {
        let now = Instant::now();
        player.media_mut().tick(now);
        if player.pump(now) {
            view.needs_render = true;
        }
        if let Some(e) = player.take_error() {
            view.error(e.to_string());
        }
        view.observe_duration(player.duration());

        let wall_now = clock.now();
        let second = wall_now.num_seconds_from_midnight();
        if shown_second != Some(second) {
            shown_second = Some(second);
            view.needs_render = true;
        }

        if view.needs_render {
            render_frame(&mut stdout, &theme, &view, player, wall_now)?;
            view.needs_render = false;
        }

        let timeout = player
            .next_tick_in(now)
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
        if event::poll(timeout)? {
            let event = event::read()?;
            let ctx = InputContext {
                clock,
                now: Instant::now(),
                seek_step: options.seek_step,
            };
            if handle_event(event, &mut view, player, &ctx) == InputResult::Quit {
                debug!("quit requested");
                break;
            }
        }
    }

    if player.is_playing() {
        player.pause();
    }
    let result = PlaybackResult {
        last_entry: player
            .playlist()
            .active_entry()
            .map(|e| e.display_name.clone()),
        target: player.playlist().target(),
        computed_start_offset: player.playlist().computed_start_offset(),
    };
    info!(last_entry = ?result.last_entry, "player stopped");
    Ok(result)
}
