#![forbid(unsafe_code)]

//! Post-release scroll motion.
//!
//! Every motion here is a closed-form function of the time elapsed since it
//! started. The host owns the clock (a frame callback, a timer, a test loop)
//! and polls [`Trajectory::tick`] with the elapsed duration; nothing is
//! integrated between polls, so skipped or irregular frames cannot drift.
//!
//! - [`FlingTrajectory`]: exponentially decaying velocity, cut off exactly at
//!   a scroll bound or when the speed drops under the stop threshold.
//! - [`SpringBack`]: critically damped return from an out-of-range offset to
//!   the nearest bound.
//! - [`FlingSolver`]: picks one of the two for a given release.

pub mod fling;
pub mod spring;

use std::time::Duration;

pub use fling::{FlingConfig, FlingSolver, FlingTrajectory};
pub use spring::SpringBack;

/// One poll of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    /// Scroll offset at the polled time.
    pub offset: f64,
    /// Offset velocity in px/s at the polled time (0.0 once finished).
    pub velocity: f64,
    /// Whether the motion has settled; later polls return the same sample.
    pub finished: bool,
}

impl TrajectorySample {
    /// A settled sample at `offset`.
    #[must_use]
    pub const fn settled(offset: f64) -> Self {
        Self {
            offset,
            velocity: 0.0,
            finished: true,
        }
    }
}

/// A scroll motion started by a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trajectory {
    /// Ballistic motion inside the scroll bounds.
    Fling(FlingTrajectory),
    /// Return from out of range (or a no-op when already in range).
    SpringBack(SpringBack),
}

impl Trajectory {
    /// Sample the motion `elapsed` after it started.
    #[must_use]
    pub fn tick(&self, elapsed: Duration) -> TrajectorySample {
        match self {
            Self::Fling(fling) => fling.sample(elapsed),
            Self::SpringBack(spring) => spring.sample(elapsed),
        }
    }

    /// Offset the motion settles at.
    #[must_use]
    pub fn final_offset(&self) -> f64 {
        match self {
            Self::Fling(fling) => fling.final_offset(),
            Self::SpringBack(spring) => spring.target(),
        }
    }

    /// Whether this is a fling rather than a spring-back.
    #[must_use]
    pub const fn is_fling(&self) -> bool {
        matches!(self, Self::Fling(_))
    }
}
