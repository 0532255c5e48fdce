//! Player view state
//!
//! Contains the `ViewState` struct that holds everything the terminal surface
//! needs besides the playlist and media, as well as shared types used across
//! player modules.

use crate::error::Result;
use crate::timecode::parse_time;

/// Milestone ceiling while the media duration is still unknown.
const UNKNOWN_DURATION_MILESTONE_CAP: f64 = 3600.0;

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
}

/// A labelled position on the timeline.
#[derive(Debug, Clone)]
pub struct MarkerPosition {
    /// Position in seconds from the start of the media
    pub time: f64,
    /// Short label shown in the legend
    pub label: String,
}

/// What a text prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Target time of day (`HH:MM`)
    TargetTime,
    /// Milestone position (`M:SS` or `H:MM:SS`)
    Milestone,
    /// Path of a file to add to the playlist
    AddFile,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TargetTime => "Target time (HH:MM)",
            Self::Milestone => "Milestone (MM:SS or HH:MM:SS)",
            Self::AddFile => "Add file",
        }
    }
}

/// An open single-line text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

/// A one-line message shown above the progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Terminal-side state of the player.
#[derive(Debug)]
pub struct ViewState {
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Current terminal width
    pub term_cols: u16,
    /// Current terminal height
    pub term_rows: u16,
    /// Open text prompt, if any
    pub prompt: Option<Prompt>,
    /// Last feedback message
    pub message: Option<StatusMessage>,
    /// Milestone marker position in seconds
    pub milestone: f64,
    /// Media duration the milestone was last checked against
    seen_duration: f64,
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl ViewState {
    /// Number of status/chrome lines (separator + progress + status bar)
    pub const STATUS_LINES: u16 = 3;

    /// First row of the playlist panel
    pub const PLAYLIST_TOP: u16 = 2;

    /// Create a new ViewState for a terminal of the given size.
    pub fn new(term_cols: u16, term_rows: u16, milestone: f64) -> Self {
        Self {
            show_help: false,
            term_cols,
            term_rows,
            prompt: None,
            message: None,
            milestone: milestone.max(0.0),
            seen_duration: 0.0,
            needs_render: true,
        }
    }

    /// Row of the progress bar (0-indexed).
    pub fn progress_row(&self) -> u16 {
        self.term_rows.saturating_sub(2)
    }

    /// Width of the clickable timeline.
    pub fn bar_width(&self) -> usize {
        crate::player::render::timeline_width(self.term_cols)
    }

    /// Row of the prompt / message line, just above the separator.
    pub fn message_row(&self) -> u16 {
        self.term_rows.saturating_sub(Self::STATUS_LINES + 1)
    }

    /// Rows available to the playlist panel.
    pub fn playlist_rows(&self) -> usize {
        // Header above, message line and chrome below
        self.term_rows
            .saturating_sub(Self::PLAYLIST_TOP + Self::STATUS_LINES + 1) as usize
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.term_cols = cols;
        self.term_rows = rows;
        self.needs_render = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            buffer: String::new(),
        });
        self.needs_render = true;
    }

    pub fn close_prompt(&mut self) -> Option<Prompt> {
        self.needs_render = true;
        self.prompt.take()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
        self.needs_render = true;
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
        self.needs_render = true;
    }

    /// Pull the milestone inside newly reported media.
    ///
    /// When the duration changes and the milestone lies beyond it, the
    /// milestone moves to the middle of the media.
    pub fn observe_duration(&mut self, duration: f64) {
        if duration == self.seen_duration {
            return;
        }
        self.seen_duration = duration;
        if duration > 0.0 && self.milestone > duration {
            self.milestone = (duration / 2.0).floor();
        }
        self.needs_render = true;
    }

    /// Set the milestone from user input.
    ///
    /// Zero is ignored; other values are capped at the media duration (or an
    /// hour while it is unknown). Returns whether the milestone changed.
    pub fn set_milestone_input(&mut self, input: &str, duration: f64) -> Result<bool> {
        let seconds = parse_time(input)? as f64;
        if seconds <= 0.0 {
            return Ok(false);
        }
        let cap = if duration > 0.0 {
            duration
        } else {
            UNKNOWN_DURATION_MILESTONE_CAP
        };
        self.milestone = seconds.min(cap);
        self.needs_render = true;
        Ok(true)
    }

    /// Timeline markers for the current media.
    pub fn markers(&self) -> Vec<MarkerPosition> {
        vec![MarkerPosition {
            time: self.milestone,
            label: "M".to_string(),
        }]
    }
}
