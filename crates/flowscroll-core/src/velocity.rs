#![forbid(unsafe_code)]

//! Rolling-window velocity estimation for the vertical axis.
//!
//! Only the most recent samples matter: averaging over a long window lets a
//! finger that paused before lifting still report the speed it had earlier.
//! The default window is two samples, further limited to a time horizon so a
//! stale sample never contributes.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

/// Default number of samples kept.
pub const DEFAULT_VELOCITY_SAMPLES: usize = 2;

/// Default age beyond which a sample is ignored.
pub const DEFAULT_VELOCITY_HORIZON: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Instant,
    y: f64,
}

/// Tracks recent Y samples and estimates the finger velocity in px/s.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    capacity: usize,
    horizon: Duration,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_SAMPLES, DEFAULT_VELOCITY_HORIZON)
    }
}

impl VelocityTracker {
    /// Create a tracker keeping at most `capacity` samples (minimum 2).
    #[must_use]
    pub fn new(capacity: usize, horizon: Duration) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            horizon,
        }
    }

    /// Record a sample. A sample with the same timestamp as the previous
    /// one replaces it.
    pub fn add(&mut self, time: Instant, y: f64) {
        if let Some(last) = self.samples.back_mut()
            && last.time == time
        {
            last.y = y;
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { time, y });
    }

    /// Discard all history.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Finger velocity along Y in px/s (positive = moving down), as of the
    /// newest sample.
    ///
    /// Returns 0.0 with fewer than two samples inside the horizon.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        match self.samples.back() {
            Some(latest) => self.velocity_at(latest.time),
            None => 0.0,
        }
    }

    /// Finger velocity along Y in px/s as seen at `now`, typically the
    /// release time.
    ///
    /// Only samples within the horizon of `now` count, so a finger that
    /// rested before lifting reports 0.0.
    #[must_use]
    pub fn velocity_at(&self, now: Instant) -> f64 {
        let mut fresh = self
            .samples
            .iter()
            .filter(|s| now.saturating_duration_since(s.time) <= self.horizon);
        let (Some(oldest), Some(latest)) = (fresh.next(), self.samples.back()) else {
            return 0.0;
        };
        let dt = latest.time.saturating_duration_since(oldest.time).as_secs_f64();
        if dt <= 0.0 {
            return 0.0;
        }
        (latest.y - oldest.y) / dt
    }
}
