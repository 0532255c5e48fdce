//! Playback coordinator.
//!
//! Binds the playlist to a single media element. It loads the active entry,
//! tracks elapsed and total time, advances on end of media, and implements
//! the jump to the synchronized start. Playback state is two independent
//! dimensions: the play/pause flag and the active playlist position.

use std::path::Path;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::error::{PlaylistError, Result};
use crate::media::{MediaElement, MediaEvent, MediaProbe, MediaSession};
use crate::playlist::{EntryId, PlaylistState, SourceRef};
use crate::player::ticker::ProgressTicker;
use crate::schedule::{SyncPlan, TimeOfDay};

/// Knobs for the coordinator's presentation policies.
#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    /// Interval of the progress smoothing poll while playing
    pub poll_interval: Duration,
    /// Keep playing after advancing to the next entry on end of media
    pub auto_resume: bool,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            auto_resume: true,
        }
    }
}

/// Drives one media element from the playlist state.
pub struct PlaybackCoordinator<M: MediaElement> {
    playlist: PlaylistState,
    session: MediaSession,
    media: M,
    playing: bool,
    elapsed: f64,
    duration: f64,
    /// Entry whose media is currently loaded
    loaded: Option<EntryId>,
    ticker: ProgressTicker,
    auto_resume: bool,
    last_error: Option<PlaylistError>,
}

impl<M: MediaElement> PlaybackCoordinator<M> {
    pub fn new(
        playlist: PlaylistState,
        session: MediaSession,
        media: M,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            playlist,
            session,
            media,
            playing: false,
            elapsed: 0.0,
            duration: 0.0,
            loaded: None,
            ticker: ProgressTicker::new(settings.poll_interval),
            auto_resume: settings.auto_resume,
            last_error: None,
        }
    }

    // === Accessors ===

    pub fn playlist(&self) -> &PlaylistState {
        &self.playlist
    }

    pub fn session(&self) -> &MediaSession {
        &self.session
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Tracked playback position of the loaded media in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Duration of the loaded media, zero until its metadata arrives.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Time until the progress poll wants to run again.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_due(now)
    }

    /// Position in the playlist of the entry whose media is loaded.
    pub fn loaded_index(&self) -> Option<usize> {
        let id = self.loaded.as_ref()?;
        self.playlist.entries().iter().position(|e| &e.id == id)
    }

    pub fn last_error(&self) -> Option<&PlaylistError> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<PlaylistError> {
        self.last_error.take()
    }

    // === Media lifecycle ===

    /// Load the active entry into the media element.
    ///
    /// Elapsed time resets to zero and the progress poll is cancelled before
    /// anything new is armed. On failure the error is kept for display and
    /// playback pauses; the playlist itself is not touched.
    pub fn load_active(&mut self, now: Instant) -> Result<()> {
        self.media.sync_clock(now);
        self.ticker.cancel();
        self.elapsed = 0.0;
        self.duration = 0.0;

        let Some(entry) = self.playlist.active_entry() else {
            self.loaded = None;
            self.playing = false;
            return Ok(());
        };
        let id = entry.id.clone();

        let result = self
            .session
            .resolve(&entry.source)
            .and_then(|locator| self.media.load(locator));

        match result {
            Ok(()) => {
                debug!(%id, "bound active entry to media");
                self.loaded = Some(id);
                if self.playing {
                    self.media.play();
                    self.ticker.arm(now);
                }
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to load active entry");
                self.loaded = None;
                self.playing = false;
                self.media.pause();
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// React to one media event.
    pub fn handle_media_event(&mut self, event: MediaEvent, now: Instant) {
        match event {
            MediaEvent::MetadataReady { duration } => {
                // Metadata of media that is no longer bound is stale
                let Some(index) = self.loaded_index() else {
                    return;
                };
                self.duration = duration;
                // Index comes from the live entry list
                let _ = self.playlist.update_duration(index, duration);
            }
            MediaEvent::TimeUpdate { position } => {
                self.elapsed = position;
            }
            MediaEvent::Ended => self.on_ended(now),
        }
    }

    /// Drain media events and service the progress poll.
    ///
    /// Returns whether anything visible changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let events = self.media.poll_events();
        let mut changed = !events.is_empty();
        for event in events {
            self.handle_media_event(event, now);
        }
        if self.ticker.poll(now) {
            self.elapsed = self.media.current_time();
            changed = true;
        }
        changed
    }

    fn on_ended(&mut self, now: Instant) {
        self.ticker.cancel();
        let advanced = self.playlist.advance().map(|next| next.is_some());

        match advanced {
            Ok(true) => {
                self.playing = self.playing && self.auto_resume;
                // A failed load is recorded in last_error and pauses playback
                let _ = self.load_active(now);
            }
            Ok(false) | Err(_) => {
                debug!("end of playlist");
                self.playing = false;
                self.media.pause();
            }
        }
    }

    // === Transport ===

    pub fn play(&mut self, now: Instant) -> Result<()> {
        self.media.sync_clock(now);
        if self.loaded.is_none() {
            if self.playlist.is_empty() {
                return Ok(());
            }
            self.load_active(now)?;
        }
        self.media.play();
        self.playing = true;
        self.ticker.arm(now);
        Ok(())
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.playing = false;
        self.ticker.cancel();
        self.elapsed = self.media.current_time();
    }

    pub fn toggle_play_pause(&mut self, now: Instant) -> Result<()> {
        self.media.sync_clock(now);
        if self.playing {
            self.pause();
            Ok(())
        } else {
            self.play(now)
        }
    }

    /// Seek to a normalized position of the loaded media at `now`.
    ///
    /// The fraction maps linearly onto `[0, duration]`; values outside
    /// `[0, 1]` are passed through for the media element to clamp.
    pub fn seek_to(&mut self, fraction: f64, now: Instant) {
        self.media.sync_clock(now);
        let target = fraction * self.duration;
        self.media.set_current_time(target);
        self.elapsed = target;
    }

    /// Seek relative to the current position, clamped to the media.
    pub fn seek_by(&mut self, delta: f64, now: Instant) {
        self.media.sync_clock(now);
        let target = (self.media.current_time() + delta).clamp(0.0, self.duration.max(0.0));
        self.media.set_current_time(target);
        self.elapsed = target;
    }

    // === Playlist operations ===

    /// Make `index` the active entry and load it.
    pub fn select(&mut self, index: usize, now: Instant) -> Result<()> {
        self.playlist.set_active_index(index)?;
        self.load_active(now)
    }

    /// Manually advance to the next entry.
    ///
    /// Returns `false` at the end of the playlist.
    pub fn next(&mut self, now: Instant) -> Result<bool> {
        if self.playlist.advance()?.is_none() {
            return Ok(false);
        }
        self.load_active(now)?;
        Ok(true)
    }

    /// Start the lead-in entry so the following entry begins at the target
    /// time.
    ///
    /// Needs at least two entries; with fewer it does nothing and returns
    /// `None`.
    pub fn jump_to_synchronized_start(
        &mut self,
        wall_now: NaiveDateTime,
        now: Instant,
    ) -> Result<Option<SyncPlan>> {
        if self.playlist.len() < 2 {
            return Ok(None);
        }
        self.media.sync_clock(now);

        let plan = self.playlist.compute_synchronized_start_offset(wall_now);
        let needs_load = self.loaded_index() != Some(0);
        self.playlist.set_active_index(0)?;
        if needs_load {
            self.load_active(now)?;
        }

        self.media.set_current_time(plan.start_offset_seconds);
        self.elapsed = plan.start_offset_seconds;
        self.media.play();
        self.playing = true;
        self.ticker.arm(now);

        info!(
            target = %self.playlist.target(),
            offset = plan.start_offset_seconds,
            early = plan.finishes_early(),
            "jumped to synchronized start"
        );
        Ok(Some(plan))
    }

    pub fn set_target_time(&mut self, target: TimeOfDay) {
        self.playlist.set_target_time(target);
    }

    pub fn set_target_time_str(&mut self, input: &str) -> Result<()> {
        self.playlist.set_target_time_str(input)
    }

    /// Add a user-selected file through a session-scoped handle.
    ///
    /// The first entry of an empty playlist is loaded right away.
    pub fn add_file(&mut self, path: &Path, now: Instant) -> Result<()> {
        let source = self.session.register(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.add_source(source, name, now)
    }

    /// Add an already-resolved source.
    pub fn add_source(
        &mut self,
        source: SourceRef,
        display_name: impl Into<String>,
        now: Instant,
    ) -> Result<()> {
        self.playlist.add_entry(source, display_name);
        if self.loaded.is_none() && self.playlist.len() == 1 {
            self.load_active(now)?;
        }
        Ok(())
    }

    /// Remove an entry and release its session media.
    pub fn remove_entry(&mut self, index: usize, now: Instant) -> Result<()> {
        let removed = self.playlist.remove_entry(index)?;
        self.session.release(&removed.source);

        if self.loaded.as_ref() == Some(&removed.id) {
            self.pause();
            self.loaded = None;
            self.load_active(now)?;
        }
        Ok(())
    }

    /// Replace the playlist with the discovery list, releasing the session
    /// media of every replaced entry.
    pub fn rediscover<S: AsRef<str>>(&mut self, dir: &Path, names: &[S], now: Instant) -> Result<()> {
        for entry in self.playlist.discover(dir, names) {
            self.session.release(&entry.source);
        }
        self.pause();
        self.loaded = None;
        self.load_active(now)
    }

    /// Measure every entry whose duration is still unknown.
    ///
    /// Returns the failures; entries that could not be measured keep a zero
    /// duration.
    pub fn preload_metadata(&mut self, probe: &dyn MediaProbe) -> Vec<PlaylistError> {
        let mut errors = Vec::new();
        for index in 0..self.playlist.len() {
            let Some(entry) = self.playlist.get(index) else {
                continue;
            };
            if entry.has_duration() {
                continue;
            }
            let measured = self
                .session
                .resolve(&entry.source)
                .and_then(|locator| probe.duration(&locator));
            match measured {
                Ok(duration) => {
                    let _ = self.playlist.update_duration(index, duration);
                }
                Err(e) => errors.push(e),
            }
        }
        errors
    }
}

impl<M: MediaElement> Drop for PlaybackCoordinator<M> {
    fn drop(&mut self) {
        self.ticker.cancel();
        if self.playing {
            self.media.pause();
        }
    }
}
