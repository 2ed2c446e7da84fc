#![forbid(unsafe_code)]

//! Critically damped spring-back.
//!
//! Based on the damped spring equation
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! at critical damping (`damping = 2√stiffness`), starting at rest. The
//! closed form is
//!
//!   x(t) = target + (x₀ - target)(1 + ωt)e^(-ωt),   ω = √stiffness
//!
//! which approaches the target monotonically: it never overshoots, so a
//! spring-back from above the range never dips below the bound it returns to.
//!
//! # Invariants
//!
//! 1. The displacement from the target shrinks monotonically with time.
//! 2. Once `|x(t) - target| <= rest_threshold` the sample is pinned to the
//!    target and reported finished.
//! 3. Stiffness and rest threshold are always positive (clamped on
//!    construction), so every spring-back finishes in finite time.

use std::time::Duration;

use super::TrajectorySample;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// Minimum rest threshold; a zero threshold would never be reached.
const MIN_REST_THRESHOLD: f64 = 0.01;

/// Default stiffness: matches a critically damped UI spring (k = 170).
pub const DEFAULT_STIFFNESS: f64 = 170.0;

/// Default distance (px) below which the spring is at rest.
pub const DEFAULT_REST_THRESHOLD: f64 = 0.5;

/// Eases an offset back to a target with no overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringBack {
    from: f64,
    target: f64,
    omega: f64,
    rest_threshold: f64,
}

impl SpringBack {
    /// Create a spring-back from `from` to `target`.
    #[must_use]
    pub fn new(from: f64, target: f64) -> Self {
        Self {
            from,
            target,
            omega: DEFAULT_STIFFNESS.sqrt(),
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.omega = k.max(MIN_STIFFNESS).sqrt();
        self
    }

    /// Set rest threshold (builder pattern). Clamped to minimum 0.01.
    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs().max(MIN_REST_THRESHOLD);
        self
    }

    /// Starting offset.
    #[inline]
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Offset the spring settles at.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Stiffness parameter.
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.omega * self.omega
    }

    /// Sample the spring `elapsed` after release.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> TrajectorySample {
        let initial = self.from - self.target;
        if initial.abs() <= self.rest_threshold {
            return TrajectorySample::settled(self.target);
        }

        let t = elapsed.as_secs_f64();
        let wt = self.omega * t;
        let decay = (-wt).exp();
        let displacement = initial * (1.0 + wt) * decay;
        if displacement.abs() <= self.rest_threshold {
            return TrajectorySample::settled(self.target);
        }

        TrajectorySample {
            offset: self.target + displacement,
            velocity: -initial * self.omega * self.omega * t * decay,
            finished: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
