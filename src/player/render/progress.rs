//! Progress bar rendering for the native player.
//!
//! Displays playback progress of the loaded video with ticks every tenth
//! and marker indicators.

use std::io::Write;

use anyhow::Result;

use super::LineBuilder;
use crate::player::state::MarkerPosition;
use crate::theme::Theme;
use crate::timecode::format_time;

/// Column the timeline starts at (0-indexed).
pub const TIMELINE_START: u16 = 1;

/// Columns kept free right of the bar for ` H:MM:SS / H:MM:SS `.
const TIME_DISPLAY_WIDTH: usize = 21;

const PLAYHEAD: char = '⏺';
const MARKER: char = '◆';
const TICK: char = '┼';
const LINE: char = '─';

/// Width of the timeline for a terminal `cols` wide.
pub fn timeline_width(cols: u16) -> usize {
    (cols as usize).saturating_sub(TIMELINE_START as usize + TIME_DISPLAY_WIDTH)
}

/// Build the progress bar character array.
///
/// Creates a visual representation of the progress bar including tick marks
/// at every 10%, marker indicators and the playhead, in increasing order of
/// precedence. Markers outside the media are not drawn.
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    total_duration: f64,
    markers: &[MarkerPosition],
) -> (Vec<char>, usize) {
    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec![LINE; bar_width];

    for tenth in 1..10 {
        let pos = bar_width * tenth / 10;
        if pos > 0 && pos < bar_width {
            bar[pos] = TICK;
        }
    }

    if total_duration > 0.0 {
        for marker in markers {
            if marker.time <= 0.0 || marker.time > total_duration {
                continue;
            }
            let pos = ((marker.time / total_duration) * bar_width as f64) as usize;
            let pos = pos.min(bar_width.saturating_sub(1));
            if pos < bar_width {
                bar[pos] = MARKER;
            }
        }
    }

    if filled < bar_width {
        bar[filled] = PLAYHEAD;
    }

    (bar, filled)
}

/// Render the progress bar with markers.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `current_time` - Current playback position
/// * `total_duration` - Duration of the loaded video
/// * `markers` - Slice of marker positions
pub fn render_progress_bar<W: Write>(
    out: &mut W,
    theme: &Theme,
    width: u16,
    row: u16,
    current_time: f64,
    total_duration: f64,
    markers: &[MarkerPosition],
) -> Result<()> {
    let bar_width = timeline_width(width);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_time, total_duration, markers);

    let mut line = LineBuilder::new(theme, row, width);
    line.raw("\x1b[48;5;236m"); // Dark gray background
    line.push(theme.text_primary, " ");

    // Consecutive cells of one color go out as a single segment
    let mut segment = String::new();
    let mut segment_color = theme.accent;
    for (i, &c) in bar.iter().enumerate() {
        let (color, glyph) = if i == filled {
            (theme.text_primary, c)
        } else if c == MARKER {
            (theme.marker, c)
        } else if i < filled {
            (theme.accent, if c == TICK { '╋' } else { '━' })
        } else {
            (theme.text_secondary, c)
        };
        if color != segment_color && !segment.is_empty() {
            line.push(segment_color, &segment);
            segment.clear();
        }
        segment_color = color;
        segment.push(glyph);
    }
    if !segment.is_empty() {
        line.push(segment_color, &segment);
    }

    let time_display = format!(" {} / {}", format_time(current_time), format_time(total_duration));
    line.push(theme.text_primary, &time_display);

    write!(out, "{}", line.finish())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(time: f64) -> MarkerPosition {
        MarkerPosition {
            time,
            label: "M".to_string(),
        }
    }

    #[test]
    fn timeline_width_leaves_room_for_time() {
        assert_eq!(timeline_width(80), 58);
        assert_eq!(timeline_width(10), 0);
    }

    #[test]
    fn empty_bar_at_zero() {
        let (bar, filled) = build_progress_bar_chars(10, 0.0, 10.0, &[]);
        assert_eq!(filled, 0);
        assert_eq!(bar[0], PLAYHEAD);
        assert_eq!(bar[1], TICK);
    }

    #[test]
    fn ticks_every_tenth() {
        let (bar, _) = build_progress_bar_chars(20, 0.0, 10.0, &[]);
        let ticks: Vec<usize> = bar
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == TICK)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(ticks, vec![2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn full_bar_at_end() {
        let (bar, filled) = build_progress_bar_chars(10, 10.0, 10.0, &[]);
        assert_eq!(filled, 10);
        assert!(!bar.contains(&PLAYHEAD));
    }

    #[test]
    fn half_progress() {
        let (bar, filled) = build_progress_bar_chars(20, 5.0, 10.0, &[]);
        assert_eq!(filled, 10);
        assert_eq!(bar[10], PLAYHEAD);
    }

    #[test]
    fn marker_at_position() {
        let (bar, _) = build_progress_bar_chars(20, 0.0, 10.0, &[marker(2.5)]);
        assert_eq!(bar[5], MARKER);
    }

    #[test]
    fn marker_at_end_stays_on_bar() {
        let (bar, _) = build_progress_bar_chars(20, 0.0, 10.0, &[marker(10.0)]);
        assert_eq!(bar[19], MARKER);
    }

    #[test]
    fn playhead_wins_over_marker() {
        let (bar, _) = build_progress_bar_chars(20, 2.5, 10.0, &[marker(2.5)]);
        assert_eq!(bar[5], PLAYHEAD);
    }

    #[test]
    fn markers_hidden_without_duration() {
        let (bar, filled) = build_progress_bar_chars(20, 0.0, 0.0, &[marker(5.0)]);
        assert_eq!(filled, 0);
        assert!(!bar.contains(&MARKER));
    }

    #[test]
    fn marker_past_the_end_is_hidden() {
        let (bar, _) = build_progress_bar_chars(20, 0.0, 10.0, &[marker(1800.0)]);
        assert!(!bar.contains(&MARKER));
    }

    #[test]
    fn progress_clamped_to_one() {
        let (_, filled) = build_progress_bar_chars(10, 15.0, 10.0, &[]);
        assert_eq!(filled, 10);
    }

    #[test]
    fn render_shows_times() {
        let theme = Theme::plain();
        let mut out = Vec::new();
        render_progress_bar(&mut out, &theme, 80, 25, 65.0, 3725.0, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[26;1H "));
        assert!(text.contains(" 1:05 / 1:02:05"));
    }
}
