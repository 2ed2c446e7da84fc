#![forbid(unsafe_code)]

//! High-level gesture events derived from raw pointer input.
//!
//! [`GestureEvent`] describes what the user meant (tap, drag, release) rather
//! than where the contacts were. The [`GestureTracker`](crate::gesture::GestureTracker)
//! produces these; the [`ScrollController`](crate::controller::ScrollController)
//! consumes them.
//!
//! # Invariants
//! 1. Every drag sequence is well-formed: `DragStart` → zero or more
//!    `DragMove` → `DragEnd` or `DragCancel`.
//! 2. `Tap` and `DragStart` never both emit for the same down → up interaction.
//! 3. `DragMove::delta_y` is in finger space (positive = finger moved down);
//!    `DragEnd::velocity` is in offset space (positive = offset increasing).

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Movement exceeded the touch slop along the vertical axis.
    DragStart {
        /// Y where the contact originally went down.
        origin_y: f64,
    },
    /// The tracked contact moved while dragging.
    DragMove {
        /// Finger displacement since the previous sample.
        delta_y: f64,
    },
    /// The last contact lifted while dragging.
    DragEnd {
        /// Release velocity of the scroll offset in px/s.
        velocity: f64,
    },
    /// The gesture was aborted while dragging.
    DragCancel,
    /// The contact lifted within the touch slop of where it went down.
    Tap {
        x: f64,
        y: f64,
    },
    /// The contact lifted without dragging and without qualifying as a tap
    /// (moved past the slop horizontally, or the container is not clickable).
    Release,
}

impl GestureEvent {
    /// Whether this event ends a gesture.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DragEnd { .. } | Self::DragCancel | Self::Tap { .. } | Self::Release
        )
    }
}
