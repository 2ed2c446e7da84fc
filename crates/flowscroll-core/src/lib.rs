#![forbid(unsafe_code)]

//! Core: geometry, pointer gestures, and vertical scroll physics.
//!
//! # Role in flowscroll
//! `flowscroll-core` is the input and motion layer. It turns a host's pointer
//! stream into drag/tap gestures and turns releases into fling or spring-back
//! trajectories that move a bounded vertical offset.
//!
//! # Primary responsibilities
//! - **GestureTracker**: touch-slop drag/tap disambiguation, multi-pointer
//!   hand-over, velocity history.
//! - **FlingSolver**: closed-form fling and spring-back trajectories polled by
//!   elapsed time.
//! - **ScrollState**: offset plus content/viewport extents and clamping.
//! - **ScrollController**: wires the three together for a host's event loop.
//!
//! # How it fits in the system
//! `flowscroll-layout` measures and arranges children and reports the content
//! height; the `flowscroll` facade hands that height to a [`ScrollController`]
//! so trajectories know their bounds.

pub mod animation;
pub mod controller;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod scroll;
pub mod semantic_event;
pub mod velocity;

pub use animation::{
    FlingConfig, FlingSolver, FlingTrajectory, SpringBack, Trajectory, TrajectorySample,
};
pub use controller::ScrollController;
pub use event::{PointerEvent, PointerEventKind, PointerId};
pub use geometry::{Rect, Sides, Size};
pub use gesture::{GestureConfig, GestureState, GestureTracker};
pub use scroll::ScrollState;
pub use semantic_event::GestureEvent;
pub use velocity::VelocityTracker;

/// Re-exported so hosts can build [`PointerEvent`] timestamps on any target.
pub use web_time::Instant;
