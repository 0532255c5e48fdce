//! Playlist state model.
//!
//! Holds the ordered entries, the active position, the target time of day and
//! the values derived from them. Every mutation is a single method call that
//! either succeeds completely or leaves the state untouched.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{PlaylistError, Result};
use crate::playlist::entry::{EntryId, SourceRef, VideoEntry};
use crate::schedule::{synchronized_start_offset, SyncPlan, TimeOfDay};

/// Source names the player looks for when no files are given.
pub const DEFAULT_DISCOVERY_NAMES: &[&str] = &["video.mp4", "video2.mp4", "video3.mp4"];

/// Ordered playlist plus timing state.
#[derive(Debug, Clone, Default)]
pub struct PlaylistState {
    entries: Vec<VideoEntry>,
    /// Cursor into `entries`; only meaningful while non-empty
    active: usize,
    target: TimeOfDay,
    computed_start_offset: f64,
    total_duration: f64,
}

impl PlaylistState {
    /// Create an empty playlist targeting `target`.
    pub fn new(target: TimeOfDay) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VideoEntry> {
        self.entries.get(index)
    }

    /// Position of the active entry, `None` while the playlist is empty.
    pub fn active_index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.active)
        }
    }

    pub fn active_entry(&self) -> Option<&VideoEntry> {
        self.active_index().and_then(|i| self.entries.get(i))
    }

    pub fn target(&self) -> TimeOfDay {
        self.target
    }

    /// Last value produced by [`Self::compute_synchronized_start_offset`].
    pub fn computed_start_offset(&self) -> f64 {
        self.computed_start_offset
    }

    /// Sum of all known entry durations.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Replace all entries with one per name found under `dir`.
    ///
    /// Ids are `video-1..`, orders `1..`, durations unknown. The active
    /// position returns to the first entry. Returns the replaced entries so
    /// their media can be released.
    pub fn discover<S: AsRef<str>>(&mut self, dir: &Path, names: &[S]) -> Vec<VideoEntry> {
        let discovered: Vec<VideoEntry> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name: &str = name.as_ref();
                VideoEntry {
                    id: EntryId::discovered(i + 1),
                    display_name: name.to_string(),
                    source: SourceRef::Path(dir.join(name)),
                    duration_seconds: 0.0,
                    order: (i + 1) as u32,
                }
            })
            .collect();

        debug!(count = discovered.len(), dir = %dir.display(), "discovered playlist entries");
        let replaced = std::mem::replace(&mut self.entries, discovered);
        self.active = 0;
        self.recompute_total();
        replaced
    }

    /// Append a new entry with an unknown duration.
    ///
    /// The active position is left alone; duplicates are allowed.
    pub fn add_entry(&mut self, source: SourceRef, display_name: impl Into<String>) -> &VideoEntry {
        let order = self.entries.len() as u32 + 1;
        let entry = VideoEntry {
            id: EntryId::added(),
            display_name: display_name.into(),
            source,
            duration_seconds: 0.0,
            order,
        };
        debug!(id = %entry.id, order, "added playlist entry");
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Remove the entry at `index` and renumber the remaining orders.
    ///
    /// The active position stays on the same entry when it survives, and
    /// falls back to the new last entry otherwise.
    pub fn remove_entry(&mut self, index: usize) -> Result<VideoEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);

        if index < self.active {
            self.active -= 1;
        }
        self.active = self.active.min(self.entries.len().saturating_sub(1));

        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.order = (i + 1) as u32;
        }
        self.recompute_total();
        debug!(id = %removed.id, index, "removed playlist entry");
        Ok(removed)
    }

    /// Make the entry at `index` the active one.
    pub fn set_active_index(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.active = index;
        Ok(())
    }

    /// Record the measured duration of the entry at `index`.
    ///
    /// Negative or non-finite values are stored as unknown (zero).
    pub fn update_duration(&mut self, index: usize, seconds: f64) -> Result<()> {
        self.check_index(index)?;
        let seconds = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self.entries[index].duration_seconds = seconds;
        self.recompute_total();
        Ok(())
    }

    /// Entry the playlist would move to on [`Self::advance`].
    pub fn peek_next(&self) -> Option<&VideoEntry> {
        self.active_index().and_then(|i| self.entries.get(i + 1))
    }

    /// Move to the next entry.
    ///
    /// Returns the new active entry, or `None` (index unchanged) when the
    /// active entry is already the last one.
    pub fn advance(&mut self) -> Result<Option<&VideoEntry>> {
        if self.entries.is_empty() {
            return Err(PlaylistError::InvalidIndex { index: 0, len: 0 });
        }
        if self.active + 1 < self.entries.len() {
            self.active += 1;
            debug!(active = self.active, "advanced playlist");
            Ok(self.entries.get(self.active))
        } else {
            Ok(None)
        }
    }

    pub fn set_target_time(&mut self, target: TimeOfDay) {
        self.target = target;
    }

    /// Parse and set the target time from `H:MM` / `HH:MM`.
    pub fn set_target_time_str(&mut self, input: &str) -> Result<()> {
        self.target = input.parse()?;
        Ok(())
    }

    /// Plan for `now` without recording it, for display.
    pub fn preview_sync_plan(&self, now: NaiveDateTime) -> SyncPlan {
        let lead_in = self
            .entries
            .first()
            .map(|e| e.duration_seconds)
            .unwrap_or(0.0);
        synchronized_start_offset(self.target, now, lead_in)
    }

    /// Compute where to start the first entry so the second begins at the
    /// target time, caching the offset.
    pub fn compute_synchronized_start_offset(&mut self, now: NaiveDateTime) -> SyncPlan {
        let plan = self.preview_sync_plan(now);
        self.computed_start_offset = plan.start_offset_seconds;
        debug!(
            target = %self.target,
            delta = plan.delta_seconds,
            offset = plan.start_offset_seconds,
            "computed synchronized start offset"
        );
        plan
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(PlaylistError::InvalidIndex {
                index,
                len: self.entries.len(),
            })
        }
    }

    fn recompute_total(&mut self) {
        self.total_duration = self.entries.iter().map(|e| e.duration_seconds).sum();
    }
}
