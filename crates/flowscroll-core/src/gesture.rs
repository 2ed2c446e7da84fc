#![forbid(unsafe_code)]

//! Drag/tap disambiguation for a vertically panning container.
//!
//! [`GestureTracker`] is a stateful processor that converts raw
//! [`PointerEvent`] sequences into [`GestureEvent`]s.
//!
//! # State Machine
//!
//! ```text
//! Idle ──down──▶ Settling ──|dy| > slop && |dy| > |dx|──▶ Dragging
//!   ▲               │                                        │
//!   └──── up / cancel (Tap, Release) ◀───────────────────────┘ up / cancel (DragEnd, DragCancel)
//! ```
//!
//! # Invariants
//!
//! 1. Tap and drag never both emit for the same down → up interaction.
//! 2. A net displacement of at least `touch_slop` never produces a `Tap`.
//! 3. Horizontal-dominant movement never starts a drag; this container only
//!    pans vertically.
//! 4. Cancel never produces a `Tap`.
//! 5. When the last contact lifts (or on cancel) the tracker is `Idle` and
//!    the velocity history is empty.
//!
//! # Failure Modes
//!
//! - Malformed sequences (a move or up for a contact that never went down)
//!   reset the tracker to `Idle` without emitting anything. Feeding a
//!   well-ordered stream is the host's obligation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::event::{PointerEvent, PointerEventKind, PointerId};
use crate::semantic_event::GestureEvent;
use crate::velocity::{DEFAULT_VELOCITY_HORIZON, DEFAULT_VELOCITY_SAMPLES, VelocityTracker};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for gesture recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum displacement (px) before a drag starts (default: 8.0).
    pub touch_slop: f64,
    /// Samples kept for velocity estimation (default: 2).
    pub velocity_samples: usize,
    /// Samples older than this at release are ignored (default: 100ms).
    pub velocity_horizon: Duration,
    /// Whether a short press is reported as a tap (default: true).
    pub clickable: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            velocity_samples: DEFAULT_VELOCITY_SAMPLES,
            velocity_horizon: DEFAULT_VELOCITY_HORIZON,
            clickable: true,
        }
    }
}

impl GestureConfig {
    /// Set the touch slop (builder pattern). Negative values are treated as zero.
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop.max(0.0);
        self
    }

    /// Set whether taps are reported (builder pattern).
    #[must_use]
    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Recognition state of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No contact is down.
    #[default]
    Idle,
    /// A contact is down but has not moved past the slop.
    Settling,
    /// The content follows the tracked contact.
    Dragging,
}

#[derive(Debug, Clone, Copy)]
struct Contact {
    id: PointerId,
    x: f64,
    y: f64,
}

// ---------------------------------------------------------------------------
// GestureTracker
// ---------------------------------------------------------------------------

/// Stateful tracker that turns pointer samples into drag/tap gestures.
///
/// Call [`process`](GestureTracker::process) for each incoming [`PointerEvent`].
#[derive(Debug, Clone)]
pub struct GestureTracker {
    config: GestureConfig,
    state: GestureState,
    contacts: Vec<Contact>,
    tracked: Option<PointerId>,
    origin: (f64, f64),
    last_y: f64,
    velocity: VelocityTracker,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureTracker {
    /// Create a new tracker with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        let velocity = VelocityTracker::new(config.velocity_samples, config.velocity_horizon);
        Self {
            config,
            state: GestureState::Idle,
            contacts: Vec::with_capacity(2),
            tracked: None,
            origin: (0.0, 0.0),
            last_y: 0.0,
            velocity,
        }
    }

    /// Process a pointer event, returning any gestures it completes or advances.
    pub fn process(&mut self, event: &PointerEvent) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(1);
        match event.kind {
            PointerEventKind::Down => self.on_down(event, &mut out),
            PointerEventKind::Move => self.on_move(event, &mut out),
            PointerEventKind::Up => self.on_up(event, &mut out),
            PointerEventKind::Cancel => self.on_cancel(&mut out),
        }
        out
    }

    /// Skip the slop and start dragging right away.
    ///
    /// Used when a contact lands on content that is still in motion: grabbing
    /// it should stop it under the finger rather than wait for the slop.
    pub fn capture(&mut self) -> Option<GestureEvent> {
        if self.state != GestureState::Settling {
            return None;
        }
        self.state = GestureState::Dragging;
        Some(GestureEvent::DragStart {
            origin_y: self.origin.1,
        })
    }

    /// Current recognition state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a drag is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state == GestureState::Dragging
    }

    /// Number of contacts currently down.
    #[inline]
    #[must_use]
    pub fn active_pointers(&self) -> usize {
        self.contacts.len()
    }

    /// Samples currently held for velocity estimation.
    #[inline]
    #[must_use]
    pub fn velocity_samples(&self) -> usize {
        self.velocity.len()
    }

    /// Reset all gesture state to idle.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.contacts.clear();
        self.tracked = None;
        self.velocity.clear();
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Velocity history is discarded.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.velocity = VelocityTracker::new(config.velocity_samples, config.velocity_horizon);
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GestureTracker {
    fn on_down(&mut self, event: &PointerEvent, _out: &mut Vec<GestureEvent>) {
        if let Some(contact) = self.contact_mut(event.id) {
            // Duplicate down for a contact we already hold: treat as a move target.
            contact.x = event.x;
            contact.y = event.y;
            return;
        }

        if self.contacts.is_empty() {
            self.reset();
            self.state = GestureState::Settling;
        }

        // The newest contact becomes the tracked one, from its own position.
        self.contacts.push(Contact {
            id: event.id,
            x: event.x,
            y: event.y,
        });
        self.track(event.id, event.x, event.y, event.time);
    }

    fn on_move(&mut self, event: &PointerEvent, out: &mut Vec<GestureEvent>) {
        let Some(contact) = self.contact_mut(event.id) else {
            self.malformed("move without down");
            return;
        };
        contact.x = event.x;
        contact.y = event.y;

        if self.tracked != Some(event.id) {
            return;
        }
        self.velocity.add(event.time, event.y);

        if self.state == GestureState::Settling {
            let dx = (event.x - self.origin.0).abs();
            let dy = (event.y - self.origin.1).abs();
            if dy > self.config.touch_slop && dy > dx {
                self.state = GestureState::Dragging;
                self.last_y = event.y;
                #[cfg(feature = "tracing")]
                tracing::debug!(origin_y = self.origin.1, y = event.y, "drag started");
                out.push(GestureEvent::DragStart {
                    origin_y: self.origin.1,
                });
            }
            return;
        }

        if self.state == GestureState::Dragging {
            let delta_y = event.y - self.last_y;
            self.last_y = event.y;
            if delta_y != 0.0 {
                out.push(GestureEvent::DragMove { delta_y });
            }
        }
    }

    fn on_up(&mut self, event: &PointerEvent, out: &mut Vec<GestureEvent>) {
        let Some(index) = self.contacts.iter().position(|c| c.id == event.id) else {
            self.malformed("up without down");
            return;
        };
        self.contacts.remove(index);

        if let Some(next) = self.contacts.last().copied() {
            // Another contact is still down; hand tracking over if needed.
            if self.tracked == Some(event.id) {
                self.track(next.id, next.x, next.y, event.time);
            }
            return;
        }

        match self.state {
            GestureState::Dragging => {
                // The up position usually repeats the last move, so only move
                // samples feed the estimate. Finger moving up (negative dy)
                // scrolls the offset forward.
                let velocity = -self.velocity.velocity_at(event.time);
                out.push(GestureEvent::DragEnd { velocity });
            }
            GestureState::Settling => {
                let displacement = (event.x - self.origin.0)
                    .abs()
                    .max((event.y - self.origin.1).abs());
                if displacement < self.config.touch_slop && self.config.clickable {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(x = event.x, y = event.y, "tap recognized");
                    out.push(GestureEvent::Tap {
                        x: event.x,
                        y: event.y,
                    });
                } else {
                    out.push(GestureEvent::Release);
                }
            }
            GestureState::Idle => {}
        }
        self.reset();
    }

    fn on_cancel(&mut self, out: &mut Vec<GestureEvent>) {
        match self.state {
            GestureState::Dragging => out.push(GestureEvent::DragCancel),
            GestureState::Settling => out.push(GestureEvent::Release),
            GestureState::Idle => {}
        }
        self.reset();
    }

    fn track(&mut self, id: PointerId, x: f64, y: f64, time: Instant) {
        self.tracked = Some(id);
        self.origin = (x, y);
        self.last_y = y;
        self.velocity.clear();
        self.velocity.add(time, y);
    }

    fn contact_mut(&mut self, id: PointerId) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id == id)
    }

    fn malformed(&mut self, _what: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(reason = _what, "malformed pointer sequence; resetting");
        self.reset();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
