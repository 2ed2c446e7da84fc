#![forbid(unsafe_code)]

//! Velocity-driven fling with exponential deceleration.
//!
//! The offset velocity decays as `v(t) = v₀·e^(-t/τ)`, giving
//!
//!   x(t) = x₀ + v₀·τ·(1 - e^(-t/τ))
//!
//! The motion ends at whichever comes first:
//! - the stop time, when `|v(t)|` falls under `stop_velocity`;
//! - the crossing time, when `x(t)` reaches the bound in the direction of
//!   travel. The last sample lands exactly on the bound, so the offset never
//!   jumps.
//!
//! # Invariants
//!
//! 1. `|velocity|` of successive samples is non-increasing.
//! 2. Every sample lies within `[min_bound, max_bound]`.
//! 3. The trajectory is finished after a finite duration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::spring::{DEFAULT_REST_THRESHOLD, DEFAULT_STIFFNESS, SpringBack};
use super::{Trajectory, TrajectorySample};

/// Smallest accepted time constant, in seconds.
const MIN_TIME_CONSTANT_SECS: f64 = 0.001;

/// Smallest accepted stop velocity, in px/s.
const MIN_STOP_VELOCITY: f64 = 0.01;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for fling and spring-back motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlingConfig {
    /// Release speeds at or below this (px/s) never fling (default: 50).
    pub min_velocity: f64,
    /// Release speeds are clamped to this (px/s) (default: 8000).
    pub max_velocity: f64,
    /// Decay time constant τ (default: 325ms).
    pub time_constant: Duration,
    /// Speed (px/s) under which a fling stops (default: 20).
    pub stop_velocity: f64,
    /// Stiffness of the critically damped spring-back (default: 170).
    pub spring_stiffness: f64,
    /// Distance (px) under which a spring-back is at rest (default: 0.5).
    pub rest_threshold: f64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            min_velocity: 50.0,
            max_velocity: 8_000.0,
            time_constant: Duration::from_millis(325),
            stop_velocity: 20.0,
            spring_stiffness: DEFAULT_STIFFNESS,
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }
}

impl FlingConfig {
    /// Set the minimum fling velocity (builder pattern).
    #[must_use]
    pub fn with_min_velocity(mut self, velocity: f64) -> Self {
        self.min_velocity = velocity.abs();
        self
    }

    /// Set the maximum fling velocity (builder pattern).
    #[must_use]
    pub fn with_max_velocity(mut self, velocity: f64) -> Self {
        self.max_velocity = velocity.abs();
        self
    }

    /// Set the decay time constant (builder pattern).
    #[must_use]
    pub fn with_time_constant(mut self, tau: Duration) -> Self {
        self.time_constant = tau;
        self
    }
}

// ---------------------------------------------------------------------------
// FlingTrajectory
// ---------------------------------------------------------------------------

/// A decelerating fling bounded to `[min_bound, max_bound]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingTrajectory {
    start_offset: f64,
    start_velocity: f64,
    min_bound: f64,
    max_bound: f64,
    tau: f64,
    end_time: f64,
    end_offset: f64,
}

impl FlingTrajectory {
    /// Build a fling starting at `start_offset` with `start_velocity` px/s.
    ///
    /// `max_bound` below `min_bound` is treated as equal to it.
    #[must_use]
    pub fn new(
        start_offset: f64,
        start_velocity: f64,
        min_bound: f64,
        max_bound: f64,
        time_constant: Duration,
        stop_velocity: f64,
    ) -> Self {
        let max_bound = max_bound.max(min_bound);
        let start_velocity = if start_velocity.is_finite() {
            start_velocity
        } else {
            0.0
        };
        let tau = time_constant.as_secs_f64().max(MIN_TIME_CONSTANT_SECS);
        let stop_velocity = stop_velocity.abs().max(MIN_STOP_VELOCITY);
        let speed = start_velocity.abs();

        let stop_time = if speed > stop_velocity {
            tau * (speed / stop_velocity).ln()
        } else {
            0.0
        };
        let amplitude = start_velocity * tau;
        let mut end_time = stop_time;
        let mut end_offset = start_offset + amplitude * (1.0 - (-stop_time / tau).exp());

        let bound = if start_velocity >= 0.0 {
            max_bound
        } else {
            min_bound
        };
        if amplitude != 0.0 {
            // Fraction of the full (infinite-time) travel needed to hit the bound.
            let ratio = (bound - start_offset) / amplitude;
            if ratio <= 0.0 {
                end_time = 0.0;
                end_offset = start_offset;
            } else if ratio < 1.0 {
                let crossing = -tau * (1.0 - ratio).ln();
                if crossing < end_time {
                    end_time = crossing;
                    end_offset = bound;
                }
            }
        }

        Self {
            start_offset,
            start_velocity,
            min_bound,
            max_bound,
            tau,
            end_time,
            end_offset: end_offset.clamp(min_bound, max_bound),
        }
    }

    /// Offset at release.
    #[inline]
    #[must_use]
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// Velocity at release (px/s).
    #[inline]
    #[must_use]
    pub fn start_velocity(&self) -> f64 {
        self.start_velocity
    }

    /// Lower scroll bound.
    #[inline]
    #[must_use]
    pub fn min_bound(&self) -> f64 {
        self.min_bound
    }

    /// Upper scroll bound.
    #[inline]
    #[must_use]
    pub fn max_bound(&self) -> f64 {
        self.max_bound
    }

    /// Offset the fling settles at.
    #[inline]
    #[must_use]
    pub fn final_offset(&self) -> f64 {
        self.end_offset
    }

    /// Time from release to settle.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.end_time)
    }

    /// Sample the fling `elapsed` after release.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> TrajectorySample {
        let t = elapsed.as_secs_f64();
        if t >= self.end_time {
            return TrajectorySample::settled(self.end_offset);
        }
        let decay = (-t / self.tau).exp();
        let offset = self.start_offset + self.start_velocity * self.tau * (1.0 - decay);
        TrajectorySample {
            offset: offset.clamp(self.min_bound, self.max_bound),
            velocity: self.start_velocity * decay,
            finished: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FlingSolver
// ---------------------------------------------------------------------------

/// Chooses the post-release motion for a given velocity and position.
#[derive(Debug, Clone, Default)]
pub struct FlingSolver {
    config: FlingConfig,
}

impl FlingSolver {
    /// Create a solver with the given configuration.
    #[must_use]
    pub fn new(config: FlingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FlingConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: FlingConfig) {
        self.config = config;
    }

    /// Solve the motion for a release.
    ///
    /// Flings when the speed exceeds `min_velocity` and the offset is strictly
    /// inside `(min_bound, max_bound)`; otherwise springs back to the nearest
    /// bound (a settled no-op when already in range).
    #[must_use]
    pub fn solve(
        &self,
        release_velocity: f64,
        current_offset: f64,
        min_bound: f64,
        max_bound: f64,
    ) -> Trajectory {
        let max_bound = max_bound.max(min_bound);
        let limit = self.config.max_velocity.abs();
        let velocity = if release_velocity.is_finite() {
            release_velocity.clamp(-limit, limit)
        } else {
            0.0
        };
        let in_bounds = current_offset > min_bound && current_offset < max_bound;

        if velocity.abs() > self.config.min_velocity && in_bounds {
            let fling = FlingTrajectory::new(
                current_offset,
                velocity,
                min_bound,
                max_bound,
                self.config.time_constant,
                self.config.stop_velocity,
            );
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = current_offset,
                velocity,
                to = fling.final_offset(),
                duration_ms = fling.duration().as_millis() as u64,
                "fling started"
            );
            return Trajectory::Fling(fling);
        }

        let target = current_offset.clamp(min_bound, max_bound);
        #[cfg(feature = "tracing")]
        tracing::debug!(from = current_offset, to = target, "spring-back started");
        Trajectory::SpringBack(
            SpringBack::new(current_offset, target)
                .with_stiffness(self.config.spring_stiffness)
                .with_rest_threshold(self.config.rest_threshold),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
