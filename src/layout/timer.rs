use std::time::{Duration, Instant};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Cancellable fixed-interval task driving animated playback. Each due poll
/// stands for exactly one layout step; missed ticks are not replayed.
#[derive(Clone, Debug)]
pub struct PlaybackTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for PlaybackTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl PlaybackTimer {
    pub fn new(interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_TICK_INTERVAL
        } else {
            interval
        };
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns the new running state.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
        self.is_running()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        self.next_due = Some(now + self.interval);
        true
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }
}
