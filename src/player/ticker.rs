//! Progress smoothing ticker.
//!
//! A cancellable fixed-interval schedule. While playback runs the
//! coordinator samples the media position on every tick so the progress bar
//! moves smoothly between the element's own time updates. Arming always
//! replaces the previous schedule, so two schedules never overlap.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ProgressTicker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl ProgressTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking one interval from `now`, dropping any earlier schedule.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Whether a tick is due at `now`; reschedules when it is.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, `None` when cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn new_ticker_is_idle() {
        let mut ticker = ProgressTicker::new(INTERVAL);
        let now = Instant::now();
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(now + Duration::from_secs(1)));
        assert_eq!(ticker.time_until_due(now), None);
    }

    #[test]
    fn armed_ticker_fires_after_interval() {
        let mut ticker = ProgressTicker::new(INTERVAL);
        let start = Instant::now();
        ticker.arm(start);

        assert!(!ticker.poll(start + Duration::from_millis(50)));
        assert!(ticker.poll(start + Duration::from_millis(100)));
        assert!(!ticker.poll(start + Duration::from_millis(150)));
        assert!(ticker.poll(start + Duration::from_millis(200)));
    }

    #[test]
    fn cancel_stops_ticks() {
        let mut ticker = ProgressTicker::new(INTERVAL);
        let start = Instant::now();
        ticker.arm(start);
        ticker.cancel();
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn rearming_replaces_the_schedule() {
        let mut ticker = ProgressTicker::new(INTERVAL);
        let start = Instant::now();
        ticker.arm(start);
        ticker.arm(start + Duration::from_millis(80));

        assert!(!ticker.poll(start + Duration::from_millis(100)));
        assert!(ticker.poll(start + Duration::from_millis(180)));
    }

    #[test]
    fn time_until_due_counts_down() {
        let mut ticker = ProgressTicker::new(INTERVAL);
        let start = Instant::now();
        ticker.arm(start);
        assert_eq!(
            ticker.time_until_due(start + Duration::from_millis(30)),
            Some(Duration::from_millis(70))
        );
        assert_eq!(
            ticker.time_until_due(start + Duration::from_millis(300)),
            Some(Duration::ZERO)
        );
    }
}
