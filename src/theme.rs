//! Theme configuration for the player and CLI
//!
//! Centralizes all color definitions. Colors are crossterm colors and are
//! emitted as raw ANSI escape codes, both for CLI output and for the
//! player's hand-built frame strings.

use crossterm::style::Color;

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// Theme configuration.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: Color,
    /// Secondary/dimmed text color
    pub text_secondary: Color,
    /// Accent color for highlights and important elements
    pub accent: Color,
    /// Error/warning color
    pub error: Color,
    /// Success color
    pub success: Color,
    /// Milestone marker on the timeline
    pub marker: Color,
    /// Key names in the status bar
    pub key_hint: Color,
    /// Whether escape codes are emitted at all
    pub colored: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::cueplay()
    }
}

impl Theme {
    /// Default theme - light gray text with green accent.
    pub fn cueplay() -> Self {
        Self {
            text_primary: Color::Grey,
            text_secondary: Color::DarkGrey,
            accent: Color::DarkGreen,
            error: Color::DarkRed,
            success: Color::DarkGreen,
            marker: Color::DarkYellow,
            key_hint: Color::DarkCyan,
            colored: true,
        }
    }

    /// Theme that emits no escape codes (for `NO_COLOR`).
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::cueplay()
        }
    }

    /// Escape code that switches the foreground to `color`.
    pub fn fg(&self, color: Color) -> &'static str {
        if self.colored {
            color_to_ansi(color)
        } else {
            ""
        }
    }

    /// Reset sequence, empty when colors are off.
    pub fn reset(&self) -> &'static str {
        if self.colored {
            ANSI_RESET
        } else {
            ""
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        format!("{}{}{}", self.fg(color), text, self.reset())
    }

    /// Format text with the accent color (for CLI output).
    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    /// Format text with the primary color (for CLI output).
    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    /// Format text with the secondary color (for CLI output).
    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    /// Format text with the error color (for CLI output).
    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    /// Format text with the success color (for CLI output).
    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }
}

/// Convert a crossterm Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::DarkRed => "\x1b[31m",
        Color::DarkGreen => "\x1b[32m",
        Color::DarkYellow => "\x1b[33m",
        Color::DarkBlue => "\x1b[34m",
        Color::DarkMagenta => "\x1b[35m",
        Color::DarkCyan => "\x1b[36m",
        Color::Grey => "\x1b[37m",
        Color::DarkGrey => "\x1b[90m",
        Color::Red => "\x1b[91m",
        Color::Green => "\x1b[92m",
        Color::Yellow => "\x1b[93m",
        Color::Blue => "\x1b[94m",
        Color::Magenta => "\x1b[95m",
        Color::Cyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // For RGB and indexed colors, fall back to no color
        _ => "",
    }
}

/// Theme for the current process.
///
/// Honors the `NO_COLOR` convention.
pub fn current_theme() -> Theme {
    match std::env::var_os("NO_COLOR") {
        Some(value) if !value.is_empty() => Theme::plain(),
        _ => Theme::default(),
    }
}
