#![forbid(unsafe_code)]

//! Glue between gestures, trajectories, and the scroll offset.
//!
//! [`ScrollController`] owns the [`ScrollState`], feeds pointer events
//! through the [`GestureTracker`], applies drag deltas directly to the
//! offset, and on release asks the [`FlingSolver`] for a trajectory which
//! the host then drives with [`tick`](ScrollController::tick) once per frame.
//!
//! # Lifecycle
//!
//! ```text
//! handle_pointer(down/move/up) ──▶ drag deltas ──▶ ScrollState
//!                 │ release
//!                 ▼
//!         FlingSolver::solve ──▶ Trajectory ──tick(now)──▶ ScrollState
//!                                      │ finished
//!                                      ▼
//!                               offset pinned, polling stops
//! ```
//!
//! A down while a trajectory is running stops it where it is and grabs the
//! content immediately.

use web_time::Instant;

use crate::animation::{FlingConfig, FlingSolver, Trajectory};
use crate::event::{PointerEvent, PointerEventKind};
use crate::gesture::{GestureConfig, GestureState, GestureTracker};
use crate::scroll::ScrollState;
use crate::semantic_event::GestureEvent;

#[derive(Debug, Clone, Copy)]
struct ActiveTrajectory {
    trajectory: Trajectory,
    started: Instant,
}

/// Drives the scroll offset from pointer input and frame ticks.
#[derive(Debug, Clone)]
pub struct ScrollController {
    scroll: ScrollState,
    tracker: GestureTracker,
    solver: FlingSolver,
    animation: Option<ActiveTrajectory>,
    scrollable: bool,
    residual: f64,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(GestureConfig::default(), FlingConfig::default())
    }
}

impl ScrollController {
    /// Create a controller with empty extents.
    #[must_use]
    pub fn new(gesture: GestureConfig, fling: FlingConfig) -> Self {
        Self {
            scroll: ScrollState::default(),
            tracker: GestureTracker::new(gesture),
            solver: FlingSolver::new(fling),
            animation: None,
            scrollable: true,
            residual: 0.0,
        }
    }

    /// Enable or disable panning (builder pattern). Taps are unaffected.
    #[must_use]
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    /// Enable or disable panning.
    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.scrollable = scrollable;
    }

    /// Whether panning is enabled.
    #[inline]
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    /// Current scroll state.
    #[inline]
    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Current offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.scroll.offset()
    }

    /// Whether a trajectory is in flight (the host should keep ticking).
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the content currently follows a contact.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// The trajectory in flight, if any.
    #[must_use]
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.animation.as_ref().map(|a| &a.trajectory)
    }

    /// Gesture tracker (read-only).
    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    /// Replace the gesture configuration.
    pub fn set_gesture_config(&mut self, config: GestureConfig) {
        self.tracker.set_config(config);
    }

    /// Replace the fling configuration.
    pub fn set_fling_config(&mut self, config: FlingConfig) {
        self.solver.set_config(config);
    }

    /// Update content and viewport heights after a layout pass.
    ///
    /// While nothing is moving, an offset left out of range by the new extents
    /// is clamped immediately.
    pub fn set_extents(&mut self, content_height: i32, viewport_height: i32) {
        self.scroll.set_extents(content_height, viewport_height);
        if self.animation.is_none() && self.tracker.state() == GestureState::Idle {
            self.scroll.settle();
        }
    }

    /// Jump to `offset` (clamped), stopping any trajectory.
    pub fn scroll_to(&mut self, offset: i32) {
        self.animation = None;
        let offset = self.scroll.clamp(offset);
        self.scroll.set_offset(offset);
    }

    /// Start a fling (or spring-back) from the current offset as if released
    /// with `velocity` px/s at `now`.
    pub fn fling(&mut self, velocity: f64, now: Instant) {
        self.release(velocity, now);
    }

    /// Feed one pointer event. Returns the gestures it produced, including
    /// any [`GestureEvent::Tap`] the host should treat as a click.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Vec<GestureEvent> {
        let mut caught = false;
        if event.kind == PointerEventKind::Down
            && self.tracker.state() == GestureState::Idle
            && let Some(active) = self.animation.take()
        {
            // Freeze the content where it is right now.
            let sample = active
                .trajectory
                .tick(event.time.saturating_duration_since(active.started));
            self.scroll.set_offset(sample.offset.round() as i32);
            caught = !sample.finished;
        }

        let was_tracking = self.tracker.state() != GestureState::Idle;
        let mut events = self.tracker.process(event);
        if caught
            && self.can_drag()
            && let Some(start) = self.tracker.capture()
        {
            events.insert(0, start);
        }

        for gesture in &events {
            match *gesture {
                GestureEvent::DragStart { .. } => {
                    self.residual = 0.0;
                }
                GestureEvent::DragMove { delta_y } => {
                    if self.can_drag() {
                        // Finger down (positive delta) moves content down: offset decreases.
                        self.residual -= delta_y;
                        let whole = self.residual.trunc();
                        self.residual -= whole;
                        self.scroll.drag_by(whole as i32);
                    }
                }
                GestureEvent::DragEnd { velocity } => self.release(velocity, event.time),
                GestureEvent::DragCancel | GestureEvent::Tap { .. } | GestureEvent::Release => {
                    self.release(0.0, event.time);
                }
            }
        }

        // A malformed sequence resets the tracker silently; don't leave the
        // content stranded past an edge.
        if was_tracking
            && self.tracker.state() == GestureState::Idle
            && !events.iter().any(GestureEvent::is_terminal)
        {
            self.release(0.0, event.time);
        }
        events
    }

    /// Advance the trajectory in flight to `now`.
    ///
    /// Returns `true` while the host should keep ticking. Once the trajectory
    /// reports finished, the offset is pinned to its settled value and later
    /// ticks return `false` without polling.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(active) = self.animation else {
            return false;
        };
        let sample = active
            .trajectory
            .tick(now.saturating_duration_since(active.started));
        self.scroll.set_offset(sample.offset.round() as i32);
        if sample.finished {
            self.animation = None;
            self.scroll.settle();
            #[cfg(feature = "tracing")]
            tracing::debug!(offset = self.scroll.offset(), "scroll settled");
            return false;
        }
        true
    }

    fn can_drag(&self) -> bool {
        self.scrollable && self.scroll.content_height() >= self.scroll.viewport_height()
    }

    fn release(&mut self, velocity: f64, now: Instant) {
        self.residual = 0.0;
        let velocity = if self.can_drag() { velocity } else { 0.0 };
        let trajectory = self.solver.solve(
            velocity,
            f64::from(self.scroll.offset()),
            0.0,
            f64::from(self.scroll.max_scroll_range()),
        );
        if !trajectory.is_fling() && !self.scroll.is_out_of_range() {
            self.animation = None;
            return;
        }
        self.animation = Some(ActiveTrajectory {
            trajectory,
            started: now,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointerId;
    use std::time::Duration;

    const MS_16: Duration = Duration::from_millis(16);

    fn controller(content: i32, viewport: i32) -> ScrollController {
        let mut c = ScrollController::default();
        c.set_extents(content, viewport);
        c
    }

    fn run_to_rest(c: &mut ScrollController, start: Instant) -> Instant {
        let mut t = start;
        for _ in 0..1_000 {
            t += MS_16;
            if !c.tick(t) {
                break;
            }
        }
        t
    }

    #[test]
    fn drag_moves_offset_opposite_to_finger() {
        let mut c = controller(2_000, 500);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 300.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 280.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 230.0, t + MS_16 * 2));
        assert_eq!(c.offset(), 50);
    }

    #[test]
    fn slow_release_in_range_does_not_animate() {
        let mut c = controller(2_000, 500);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 300.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 290.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 240.0, t + MS_16 * 2));
        c.handle_pointer(&PointerEvent::moved(0.0, 240.0, t + Duration::from_millis(300)));
        c.handle_pointer(&PointerEvent::up(0.0, 240.0, t + Duration::from_millis(310)));
        assert!(!c.is_animating());
        assert_eq!(c.offset(), 50);
    }

    #[test]
    fn overscroll_springs_back_to_top() {
        let mut c = controller(2_000, 500);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 100.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 200.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 260.0, t + MS_16 * 2));
        assert!(c.offset() < 0);

        c.handle_pointer(&PointerEvent::up(0.0, 260.0, t + MS_16 * 3));
        assert!(c.is_animating());
        run_to_rest(&mut c, t + MS_16 * 3);
        assert_eq!(c.offset(), 0);
        assert!(!c.is_animating());
    }

    #[test]
    fn fling_settles_in_range() {
        let mut c = controller(10_000, 500);
        c.scroll_to(4_000);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 400.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 350.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 300.0, t + MS_16 * 2));
        c.handle_pointer(&PointerEvent::up(0.0, 250.0, t + MS_16 * 3));
        assert!(c.trajectory().is_some_and(Trajectory::is_fling));

        let before = c.offset();
        run_to_rest(&mut c, t + MS_16 * 3);
        assert!(c.offset() > before);
        assert!(c.offset() <= c.scroll().max_scroll_range());
        assert!(!c.tick(t + Duration::from_secs(60)));
    }

    #[test]
    fn release_at_last_move_position_flings() {
        let mut c = controller(10_000, 500);
        c.scroll_to(4_000);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 400.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 350.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 300.0, t + MS_16 * 2));
        c.handle_pointer(&PointerEvent::moved(0.0, 250.0, t + MS_16 * 3));
        let release = t + MS_16 * 3 + Duration::from_millis(8);
        let events = c.handle_pointer(&PointerEvent::up(0.0, 250.0, release));
        let [GestureEvent::DragEnd { velocity }] = events.as_slice() else {
            panic!("expected DragEnd, got {events:?}");
        };
        assert!((*velocity - 3_125.0).abs() < 1e-6, "velocity: {velocity}");
        assert!(c.trajectory().is_some_and(Trajectory::is_fling));

        let before = c.offset();
        run_to_rest(&mut c, release);
        assert!(c.offset() > before);
    }

    #[test]
    fn down_catches_fling() {
        let mut c = controller(10_000, 500);
        c.scroll_to(4_000);
        let t = Instant::now();
        c.fling(3_000.0, t);
        assert!(c.tick(t + MS_16 * 5));
        let frozen = c.offset();

        let events = c.handle_pointer(&PointerEvent::down(0.0, 100.0, t + MS_16 * 5));
        assert!(matches!(events[..], [GestureEvent::DragStart { .. }]));
        assert!(!c.is_animating());
        assert!(c.is_dragging());
        assert_eq!(c.offset(), frozen);

        // Small movement follows the finger without waiting for the slop.
        c.handle_pointer(&PointerEvent::moved(0.0, 97.0, t + MS_16 * 6));
        assert_eq!(c.offset(), frozen + 3);
    }

    #[test]
    fn tap_is_reported_without_offset_change() {
        let mut c = controller(2_000, 500);
        c.scroll_to(120);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(10.0, 10.0, t));
        let events = c.handle_pointer(&PointerEvent::up(11.0, 12.0, t + MS_16));
        assert_eq!(events, vec![GestureEvent::Tap { x: 11.0, y: 12.0 }]);
        assert_eq!(c.offset(), 120);
        assert!(!c.is_animating());
    }

    #[test]
    fn not_scrollable_ignores_drags() {
        let mut c = controller(2_000, 500).with_scrollable(false);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 300.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 100.0, t + MS_16));
        c.handle_pointer(&PointerEvent::up(0.0, 50.0, t + MS_16 * 2));
        assert_eq!(c.offset(), 0);
        assert!(!c.is_animating());
    }

    #[test]
    fn short_content_ignores_drags() {
        let mut c = controller(300, 500);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 300.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 100.0, t + MS_16));
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn cancel_springs_back() {
        let mut c = controller(1_000, 500);
        c.scroll_to(500);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 300.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 290.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 190.0, t + MS_16 * 2));
        assert_eq!(c.offset(), 600);
        let events = c.handle_pointer(&PointerEvent::cancel(t + MS_16 * 3));
        assert_eq!(events, vec![GestureEvent::DragCancel]);
        run_to_rest(&mut c, t + MS_16 * 3);
        assert_eq!(c.offset(), 500);
    }

    #[test]
    fn malformed_sequence_mid_drag_springs_back() {
        let mut c = controller(1_000, 500);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 100.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 120.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 200.0, t + MS_16 * 2));
        assert_eq!(c.offset(), -80);

        let stray = PointerEvent::moved(0.0, 0.0, t + MS_16 * 3).with_id(PointerId(9));
        assert!(c.handle_pointer(&stray).is_empty());
        assert!(c.is_animating());
        run_to_rest(&mut c, t + MS_16 * 3);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn shrinking_extents_clamp_when_idle() {
        let mut c = controller(2_000, 500);
        c.scroll_to(1_500);
        c.set_extents(800, 500);
        assert_eq!(c.offset(), 300);
    }
}
