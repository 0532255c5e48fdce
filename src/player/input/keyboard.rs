//! Keyboard input handling for the native player.
//!
//! Handles all keyboard shortcuts including transport controls, playlist
//! navigation, the synchronized start jump and the text prompts.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::InputContext;
use crate::media::MediaElement;
use crate::player::coordinator::PlaybackCoordinator;
use crate::player::state::{InputResult, Prompt, PromptKind, ViewState};
use crate::timecode::format_time;

/// Fraction of the video moved by Shift+arrow.
const COARSE_SEEK_FRACTION: f64 = 0.05;

/// Handle a keyboard event.
///
/// This is the main keyboard input handler that processes all key events
/// and updates state or returns control flow signals.
pub fn handle_key_event<M: MediaElement>(
    key: KeyEvent,
    view: &mut ViewState,
    player: &mut PlaybackCoordinator<M>,
    ctx: &InputContext<'_>,
) -> InputResult {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    if view.prompt.is_some() {
        handle_prompt_key(key, view, player, ctx);
        return InputResult::Continue;
    }

    // If help is showing, any key closes it
    if view.show_help {
        view.toggle_help();
        return InputResult::Continue;
    }

    view.needs_render = true;
    match key.code {
        // === Quit ===
        KeyCode::Char('q') => InputResult::Quit,
        KeyCode::Esc => {
            if view.message.take().is_some() {
                InputResult::Continue
            } else {
                InputResult::Quit
            }
        }

        KeyCode::Char('?') => {
            view.toggle_help();
            InputResult::Continue
        }

        // === Transport ===
        KeyCode::Char(' ') => {
            if let Err(e) = player.toggle_play_pause(ctx.now) {
                view.error(e.to_string());
            }
            InputResult::Continue
        }
        KeyCode::Left => {
            let step = seek_amount(key.modifiers, player.duration(), ctx.seek_step);
            player.seek_by(-step, ctx.now);
            InputResult::Continue
        }
        KeyCode::Right => {
            let step = seek_amount(key.modifiers, player.duration(), ctx.seek_step);
            player.seek_by(step, ctx.now);
            InputResult::Continue
        }
        KeyCode::Home => {
            player.seek_to(0.0, ctx.now);
            InputResult::Continue
        }

        // === Playlist ===
        KeyCode::Char('n') => {
            match player.next(ctx.now) {
                Ok(true) => {}
                Ok(false) => view.info("End of playlist"),
                Err(e) => view.error(e.to_string()),
            }
            InputResult::Continue
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if let Err(e) = player.select(index, ctx.now) {
                view.error(e.to_string());
            }
            InputResult::Continue
        }
        KeyCode::Char('x') => {
            remove_active(view, player, ctx);
            InputResult::Continue
        }

        // === Schedule ===
        KeyCode::Char('j') => {
            jump(view, player, ctx);
            InputResult::Continue
        }

        // === Prompts ===
        KeyCode::Char('t') => {
            view.open_prompt(PromptKind::TargetTime);
            InputResult::Continue
        }
        KeyCode::Char('m') => {
            view.open_prompt(PromptKind::Milestone);
            InputResult::Continue
        }
        KeyCode::Char('a') => {
            view.open_prompt(PromptKind::AddFile);
            InputResult::Continue
        }

        _ => {
            view.needs_render = false;
            InputResult::Continue
        }
    }
}

/// Seek distance for an arrow key: the configured step, or 5% with Shift.
fn seek_amount(modifiers: KeyModifiers, duration: f64, step: f64) -> f64 {
    if modifiers.contains(KeyModifiers::SHIFT) {
        duration * COARSE_SEEK_FRACTION
    } else {
        step
    }
}

fn jump<M: MediaElement>(
    view: &mut ViewState,
    player: &mut PlaybackCoordinator<M>,
    ctx: &InputContext<'_>,
) {
    let wall_now = ctx.clock.now();
    match player.jump_to_synchronized_start(wall_now, ctx.now) {
        Ok(Some(plan)) => {
            let mut text = format!(
                "Video 1 from {}; video 2 starts at {}",
                format_time(plan.start_offset_seconds),
                plan.target_instant.format("%H:%M"),
            );
            if plan.is_tomorrow(wall_now) {
                text.push_str(" tomorrow");
            }
            if plan.finishes_early() {
                text.push_str(&format!(
                    " (lead-in ends {} early)",
                    format_time(plan.early_by_seconds())
                ));
            }
            view.info(text);
        }
        Ok(None) => view.error("Need at least two videos for a synchronized start"),
        Err(e) => view.error(e.to_string()),
    }
}

fn remove_active<M: MediaElement>(
    view: &mut ViewState,
    player: &mut PlaybackCoordinator<M>,
    ctx: &InputContext<'_>,
) {
    let Some(index) = player.playlist().active_index() else {
        return;
    };
    let name = player
        .playlist()
        .get(index)
        .map(|e| e.display_name.clone())
        .unwrap_or_default();
    match player.remove_entry(index, ctx.now) {
        Ok(()) => view.info(format!("Removed {}", name)),
        Err(e) => view.error(e.to_string()),
    }
}

/// Edit the open prompt; Enter submits, Esc cancels.
fn handle_prompt_key<M: MediaElement>(
    key: KeyEvent,
    view: &mut ViewState,
    player: &mut PlaybackCoordinator<M>,
    ctx: &InputContext<'_>,
) {
    view.needs_render = true;
    match key.code {
        KeyCode::Esc => {
            view.close_prompt();
        }
        KeyCode::Enter => {
            if let Some(prompt) = view.close_prompt() {
                submit_prompt(prompt, view, player, ctx);
            }
        }
        KeyCode::Backspace => {
            if let Some(prompt) = view.prompt.as_mut() {
                prompt.buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(prompt) = view.prompt.as_mut() {
                prompt.buffer.push(c);
            }
        }
        _ => view.needs_render = false,
    }
}

fn submit_prompt<M: MediaElement>(
    prompt: Prompt,
    view: &mut ViewState,
    player: &mut PlaybackCoordinator<M>,
    ctx: &InputContext<'_>,
) {
    let input = prompt.buffer.trim();
    if input.is_empty() {
        return;
    }

    match prompt.kind {
        PromptKind::TargetTime => match player.set_target_time_str(input) {
            Ok(()) => view.info(format!("Target time set to {}", player.playlist().target())),
            Err(e) => view.error(e.to_string()),
        },
        PromptKind::Milestone => match view.set_milestone_input(input, player.duration()) {
            Ok(true) => {
                let text = format!("Milestone set to {}", format_time(view.milestone));
                view.info(text);
            }
            Ok(false) => view.info("Milestone unchanged"),
            Err(e) => view.error(e.to_string()),
        },
        PromptKind::AddFile => match player.add_file(Path::new(input), ctx.now) {
            Ok(()) => view.info(format!("Added {}", input)),
            Err(e) => view.error(e.to_string()),
        },
    }
}
