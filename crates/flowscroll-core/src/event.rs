#![forbid(unsafe_code)]

//! Pointer input delivered by the host.
//!
//! The host translates its platform touch/mouse stream into [`PointerEvent`]
//! values and feeds them to the gesture layer in chronological order. Every
//! event carries its own timestamp so velocity estimation never depends on
//! when the event happens to be processed.

use web_time::Instant;

/// Identifier of a single contact (finger, stylus, mouse button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PointerId(pub u32);

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// A contact went down. A down for a new id while another contact is
    /// already down is a secondary pointer.
    Down,
    /// A contact moved.
    Move,
    /// A contact lifted.
    Up,
    /// The host aborted the whole gesture (e.g. a parent stole the stream).
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,
    /// Which contact produced the sample.
    pub id: PointerId,
    /// X position in container pixels.
    pub x: f64,
    /// Y position in container pixels.
    pub y: f64,
    /// When the host observed the sample.
    pub time: Instant,
}

impl PointerEvent {
    /// Create a new pointer event for the primary contact.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64, time: Instant) -> Self {
        Self {
            kind,
            id: PointerId(0),
            x,
            y,
            time,
        }
    }

    /// Attribute the event to a different contact.
    #[must_use]
    pub const fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    /// Shorthand for a primary-pointer down.
    #[must_use]
    pub const fn down(x: f64, y: f64, time: Instant) -> Self {
        Self::new(PointerEventKind::Down, x, y, time)
    }

    /// Shorthand for a primary-pointer move.
    #[must_use]
    pub const fn moved(x: f64, y: f64, time: Instant) -> Self {
        Self::new(PointerEventKind::Move, x, y, time)
    }

    /// Shorthand for a primary-pointer up.
    #[must_use]
    pub const fn up(x: f64, y: f64, time: Instant) -> Self {
        Self::new(PointerEventKind::Up, x, y, time)
    }

    /// Shorthand for a cancel.
    #[must_use]
    pub const fn cancel(time: Instant) -> Self {
        Self::new(PointerEventKind::Cancel, 0.0, 0.0, time)
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}
