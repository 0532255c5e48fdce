//! Status bar rendering for the native player.
//!
//! Displays the play state, playlist position, prompt line and keyboard
//! shortcuts.

use std::io::Write;

use anyhow::Result;

use super::LineBuilder;
use crate::player::state::{Prompt, StatusMessage};
use crate::theme::Theme;

/// Shortcuts listed in the status bar, as (key, action) pairs.
const SHORTCUTS: &[(&str, &str)] = &[
    ("n", "next"),
    ("j", "jump"),
    ("t", "target"),
    ("m", "mile"),
    ("a", "add"),
    ("x", "del"),
    ("?", "help"),
    ("q", "quit"),
];

/// Count digits in a number (for width calculation).
#[inline]
pub fn count_digits(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        (n as f64).log10().floor() as usize + 1
    }
}

/// Render a separator line.
pub fn render_separator_line<W: Write>(out: &mut W, theme: &Theme, width: u16, row: u16) -> Result<()> {
    let mut line = LineBuilder::new(theme, row, width);
    line.push(theme.text_secondary, &"─".repeat(width as usize));
    write!(out, "{}", line.finish())?;
    Ok(())
}

/// Render the prompt being typed, or the last message.
pub fn render_message_line<W: Write>(
    out: &mut W,
    theme: &Theme,
    width: u16,
    row: u16,
    prompt: Option<&Prompt>,
    message: Option<&StatusMessage>,
) -> Result<()> {
    let mut line = LineBuilder::new(theme, row, width);
    line.push(theme.text_primary, " ");

    if let Some(prompt) = prompt {
        line.push(theme.accent, prompt.kind.label())
            .push(theme.text_secondary, ": ")
            .push(theme.text_primary, &prompt.buffer)
            .push(theme.accent, "█")
            .push(theme.text_secondary, "  enter:ok esc:cancel");
    } else if let Some(message) = message {
        let color = if message.is_error {
            theme.error
        } else {
            theme.success
        };
        line.push(color, &message.text);
    }

    write!(out, "{}", line.finish())?;
    Ok(())
}

/// Render the status/controls bar.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `playing` - Whether playback is running
/// * `position` - 1-based number of the loaded entry and playlist length
pub fn render_status_bar<W: Write>(
    out: &mut W,
    theme: &Theme,
    width: u16,
    row: u16,
    playing: bool,
    position: Option<(usize, usize)>,
) -> Result<()> {
    let mut line = LineBuilder::new(theme, row, width);

    // ▶ and ⏸ are double-width in most terminals
    let state = if playing { " ⏸  " } else { " ▶  " };
    line.push(theme.text_primary, state);

    if let Some((number, len)) = position {
        let digits = count_digits(len);
        line.push(
            theme.text_secondary,
            &format!("[{:>digits$}/{}] ", number, len, digits = digits),
        );
    }

    let play_action = if playing { ":pause " } else { ":play " };
    line.push(theme.text_secondary, "│ ")
        .push(theme.key_hint, "space")
        .push(theme.text_secondary, play_action);
    for (key, action) in SHORTCUTS {
        line.push(theme.key_hint, key)
            .push(theme.text_secondary, &format!(":{} ", action));
    }

    write!(out, "{}", line.finish())?;
    Ok(())
}
