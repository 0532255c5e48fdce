//! Media element driven by a monotonic clock.
//!
//! `ClockedMedia` measures duration through a probe on load and then moves
//! its playback position forward in real time. The owner feeds it the
//! current instant with [`ClockedMedia::tick`]; nothing advances otherwise,
//! which keeps it deterministic under test.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::Result;
use crate::media::{MediaElement, MediaEvent, MediaLocator, MediaProbe};

/// Interval between time-update events while playing.
pub const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Wall-clock media element.
pub struct ClockedMedia {
    probe: Box<dyn MediaProbe>,
    locator: Option<MediaLocator>,
    duration: f64,
    /// Position at the moment playback (re)started or was last set
    base_position: f64,
    /// Instant the position was anchored at while playing
    playing_since: Option<Instant>,
    now: Instant,
    last_time_update: Option<Instant>,
    pending: Vec<MediaEvent>,
}

impl ClockedMedia {
    pub fn new(probe: impl MediaProbe + 'static, now: Instant) -> Self {
        Self {
            probe: Box::new(probe),
            locator: None,
            duration: 0.0,
            base_position: 0.0,
            playing_since: None,
            now,
            last_time_update: None,
            pending: Vec::new(),
        }
    }

    /// Advance the element's notion of "now".
    ///
    /// Raises time-update events at [`TIME_UPDATE_INTERVAL`] and the ended
    /// event once the position reaches the duration.
    pub fn tick(&mut self, now: Instant) {
        if now < self.now {
            return;
        }
        self.now = now;

        let Some(since) = self.playing_since else {
            return;
        };

        let position = self.position_at(now);
        if position >= self.duration {
            self.base_position = self.duration;
            self.playing_since = None;
            self.last_time_update = None;
            self.pending.push(MediaEvent::TimeUpdate {
                position: self.duration,
            });
            self.pending.push(MediaEvent::Ended);
            debug!(locator = ?self.locator, "media ended");
            return;
        }

        let last = self.last_time_update.unwrap_or(since);
        if now.duration_since(last) >= TIME_UPDATE_INTERVAL {
            self.last_time_update = Some(now);
            self.pending.push(MediaEvent::TimeUpdate { position });
        }
    }

    /// Currently loaded media.
    pub fn locator(&self) -> Option<&MediaLocator> {
        self.locator.as_ref()
    }

    fn position_at(&self, now: Instant) -> f64 {
        match self.playing_since {
            Some(since) => {
                let elapsed = now.saturating_duration_since(since).as_secs_f64();
                (self.base_position + elapsed).min(self.duration)
            }
            None => self.base_position,
        }
    }
}

impl MediaElement for ClockedMedia {
    fn load(&mut self, locator: MediaLocator) -> Result<()> {
        // Whatever was loaded is gone, even if the new media cannot be measured
        self.locator = None;
        self.duration = 0.0;
        self.base_position = 0.0;
        self.playing_since = None;
        self.last_time_update = None;
        self.pending.clear();

        let duration = self.probe.duration(&locator)?;
        info!(%locator, duration, "loaded media");
        self.locator = Some(locator);
        self.duration = duration;
        self.pending.push(MediaEvent::MetadataReady { duration });
        Ok(())
    }

    fn play(&mut self) {
        if self.locator.is_none() || self.playing_since.is_some() {
            return;
        }
        // Playing from the end restarts, like a native element
        if self.base_position >= self.duration {
            self.base_position = 0.0;
        }
        self.playing_since = Some(self.now);
        self.last_time_update = None;
    }

    fn pause(&mut self) {
        if self.playing_since.is_some() {
            self.base_position = self.position_at(self.now);
            self.playing_since = None;
            self.pending.push(MediaEvent::TimeUpdate {
                position: self.base_position,
            });
        }
    }

    fn is_paused(&self) -> bool {
        self.playing_since.is_none()
    }

    fn set_current_time(&mut self, seconds: f64) {
        let position = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration)
        } else {
            0.0
        };
        self.base_position = position;
        if self.playing_since.is_some() {
            self.playing_since = Some(self.now);
        }
        // An end not yet delivered is superseded by the seek
        self.pending.retain(|event| *event != MediaEvent::Ended);
        self.pending.push(MediaEvent::TimeUpdate { position });
    }

    fn current_time(&self) -> f64 {
        self.position_at(self.now)
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.pending)
    }

    fn sync_clock(&mut self, now: Instant) {
        self.tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::KnownDurations;
    use std::path::PathBuf;

    fn media(start: Instant) -> ClockedMedia {
        let mut known = KnownDurations::new();
        known.insert("clip.mp4", 10.0);
        ClockedMedia::new(known, start)
    }

    fn clip() -> MediaLocator {
        MediaLocator::File(PathBuf::from("/media/clip.mp4"))
    }

    #[test]
    fn load_reports_metadata_and_stays_paused() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();

        assert!(media.is_paused());
        assert_eq!(media.duration(), 10.0);
        assert_eq!(
            media.poll_events(),
            vec![MediaEvent::MetadataReady { duration: 10.0 }]
        );
        assert!(media.poll_events().is_empty());
    }

    #[test]
    fn load_failure_keeps_previous_media() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();
        assert!(media
            .load(MediaLocator::File(PathBuf::from("/media/other.mp4")))
            .is_err());
        assert_eq!(media.locator(), Some(&clip()));
    }

    #[test]
    fn position_follows_the_clock_while_playing() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();
        media.poll_events();

        media.play();
        media.tick(start + Duration::from_secs(3));
        assert!((media.current_time() - 3.0).abs() < 1e-9);
        assert_eq!(
            media.poll_events(),
            vec![MediaEvent::TimeUpdate { position: 3.0 }]
        );

        media.pause();
        media.tick(start + Duration::from_secs(6));
        assert!((media.current_time() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn time_updates_are_throttled() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();
        media.poll_events();
        media.play();

        media.tick(start + Duration::from_millis(100));
        media.tick(start + Duration::from_millis(200));
        assert!(media.poll_events().is_empty());

        media.tick(start + Duration::from_millis(300));
        assert_eq!(media.poll_events().len(), 1);
    }

    #[test]
    fn reaching_the_end_raises_ended_once() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();
        media.poll_events();
        media.set_current_time(8.0);
        media.poll_events();
        media.play();

        media.tick(start + Duration::from_secs(5));
        let events = media.poll_events();
        assert_eq!(events.last(), Some(&MediaEvent::Ended));
        assert!(media.is_paused());
        assert_eq!(media.current_time(), 10.0);

        media.tick(start + Duration::from_secs(6));
        assert!(media.poll_events().is_empty());
    }

    #[test]
    fn set_current_time_is_clamped_by_the_element() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();
        media.set_current_time(25.0);
        assert_eq!(media.current_time(), 10.0);
        media.set_current_time(-3.0);
        assert_eq!(media.current_time(), 0.0);
    }

    #[test]
    fn play_without_media_does_nothing() {
        let start = Instant::now();
        let mut media = media(start);
        media.play();
        assert!(media.is_paused());
    }

    #[test]
    fn play_after_sync_starts_at_the_input_instant() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();
        media.tick(start);

        let pressed = start + Duration::from_millis(200);
        media.sync_clock(pressed);
        media.set_current_time(4.0);
        media.play();
        media.tick(pressed);

        assert_eq!(media.current_time(), 4.0);
        media.tick(pressed + Duration::from_secs(1));
        assert!((media.current_time() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn failed_load_drops_previous_media_and_events() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();

        let unknown = MediaLocator::Url("https://cdn.example.com/unknown.mp4".into());
        assert!(media.load(unknown).is_err());

        assert!(media.poll_events().is_empty());
        assert_eq!(media.duration(), 0.0);
        assert!(media.locator().is_none());
        media.play();
        assert!(media.is_paused());
    }

    #[test]
    fn seek_discards_undelivered_end() {
        let start = Instant::now();
        let mut media = media(start);
        media.load(clip()).unwrap();
        media.poll_events();
        media.play();

        media.tick(start + Duration::from_secs(11));
        media.set_current_time(2.0);

        let events = media.poll_events();
        assert!(!events.contains(&MediaEvent::Ended));
        assert_eq!(events.last(), Some(&MediaEvent::TimeUpdate { position: 2.0 }));
    }
}
