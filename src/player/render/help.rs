//! Help overlay rendering for the native player.
//!
//! Displays a centered help overlay with all available keyboard shortcuts.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::theme::Theme;

/// Help text lines for the help overlay.
pub const HELP_LINES: &[&str] = &[
    "",
    "  ╔═══════════════════════════════════════════╗",
    "  ║            Cue Player Help                ║",
    "  ╠═══════════════════════════════════════════╣",
    "  ║                                           ║",
    "  ║  Playback                                 ║",
    "  ║    Space      Play / Pause                ║",
    "  ║    <-/->      Seek -/+ seek step          ║",
    "  ║    Shift+<-/->  Seek -/+ 5%               ║",
    "  ║    Home       Back to start of video      ║",
    "  ║    Click bar  Seek to position            ║",
    "  ║                                           ║",
    "  ║  Playlist                                 ║",
    "  ║    n          Next video                  ║",
    "  ║    1-9        Select video                ║",
    "  ║    Click row  Select video                ║",
    "  ║    a          Add a file                  ║",
    "  ║    x          Remove selected video       ║",
    "  ║                                           ║",
    "  ║  Schedule                                 ║",
    "  ║    j          Jump to synchronized start  ║",
    "  ║    t          Set target time             ║",
    "  ║    m          Set milestone marker        ║",
    "  ║                                           ║",
    "  ║  General                                  ║",
    "  ║    ?          Show this help              ║",
    "  ║    q          Quit player                 ║",
    "  ║                                           ║",
    "  ║         Press any key to close            ║",
    "  ╚═══════════════════════════════════════════╝",
    "",
];

/// Width of the help box (for centering calculations).
pub const HELP_BOX_WIDTH: usize = 47;

/// Calculate the starting row for centering the help box.
pub fn calc_help_start_row(term_height: u16) -> u16 {
    let box_height = HELP_LINES.len() as u16;
    (term_height.saturating_sub(box_height)) / 2
}

/// Calculate the starting column for centering the help box.
pub fn calc_help_start_col(term_width: u16) -> u16 {
    ((term_width as usize).saturating_sub(HELP_BOX_WIDTH) / 2) as u16
}

/// Render the help overlay.
///
/// Clears the screen and draws a centered help box with all shortcuts.
pub fn render_help<W: Write>(out: &mut W, theme: &Theme, width: u16, height: u16) -> Result<()> {
    let start_row = calc_help_start_row(height);
    let col = calc_help_start_col(width);

    queue!(out, Clear(ClearType::All))?;

    for (i, line) in HELP_LINES.iter().enumerate() {
        let row = start_row + i as u16;
        if row >= height {
            break;
        }
        queue!(out, MoveTo(col, row))?;
        if theme.colored {
            queue!(out, SetForegroundColor(theme.accent), Print(line), ResetColor)?;
        } else {
            queue!(out, Print(line))?;
        }
    }

    Ok(())
}
