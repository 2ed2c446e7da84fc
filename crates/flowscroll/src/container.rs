#![forbid(unsafe_code)]

//! The flow container: layout and scrolling composed.
//!
//! Layout and scroll only meet through the extents: after every
//! [`measure`](FlowContainer::measure) the content height and the resolved
//! height are handed to the [`ScrollController`], which bounds drags and
//! trajectories by them.
//!
//! Nothing here is cached against child changes. Whenever a child's size or
//! parameters change, the host calls `measure` again.

use flowscroll_core::{
    GestureEvent, Instant, PointerEvent, Rect, ScrollController, ScrollState, Size,
};
use flowscroll_layout::{FlowItem, FlowMeasurement, FlowMeasurer, Measurable, SizeSpec};

use crate::FlowConfig;

/// A wrapping flow of children with vertical panning.
#[derive(Debug)]
pub struct FlowContainer<M> {
    config: FlowConfig,
    measurer: FlowMeasurer,
    items: Vec<FlowItem<M>>,
    measurement: Option<FlowMeasurement>,
    placements: Vec<Rect>,
    scroll: ScrollController,
}

impl<M: Measurable> FlowContainer<M> {
    /// Create an empty container.
    #[must_use]
    pub fn new(config: FlowConfig) -> Self {
        let scroll = ScrollController::new(config.gesture_config(), config.fling.clone())
            .with_scrollable(config.scrollable);
        Self {
            measurer: FlowMeasurer::new(config.constraints()),
            config,
            items: Vec::new(),
            measurement: None,
            placements: Vec::new(),
            scroll,
        }
    }

    /// Replace the children (builder pattern).
    #[must_use]
    pub fn with_items(mut self, items: Vec<FlowItem<M>>) -> Self {
        self.items = items;
        self
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect for layout on the next
    /// [`measure`](Self::measure); gesture and fling tuning apply at once.
    pub fn set_config(&mut self, config: FlowConfig) {
        self.measurer = FlowMeasurer::new(config.constraints());
        self.scroll.set_gesture_config(config.gesture_config());
        self.scroll.set_fling_config(config.fling.clone());
        self.scroll.set_scrollable(config.scrollable);
        self.config = config;
    }

    /// Append a child.
    pub fn push(&mut self, item: FlowItem<M>) {
        self.items.push(item);
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Children in order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[FlowItem<M>] {
        &self.items
    }

    /// Children in order, for in-place edits.
    #[inline]
    pub fn items_mut(&mut self) -> &mut [FlowItem<M>] {
        &mut self.items
    }

    /// Measure and arrange every child and update the scroll extents.
    ///
    /// Returns the container's resolved size.
    pub fn measure(&mut self, width: SizeSpec, height: SizeSpec) -> Size {
        let measurement = self.measurer.measure(&mut self.items, width, height);
        self.placements = measurement.arrange();
        self.scroll
            .set_extents(measurement.content_height(), measurement.height());
        let size = measurement.size();
        self.measurement = Some(measurement);
        size
    }

    /// The last measurement, if any.
    #[inline]
    #[must_use]
    pub fn measurement(&self) -> Option<&FlowMeasurement> {
        self.measurement.as_ref()
    }

    /// Resolved container size from the last measurement.
    #[must_use]
    pub fn size(&self) -> Size {
        self.measurement
            .as_ref()
            .map_or(Size::ZERO, FlowMeasurement::size)
    }

    /// Widest row, padding included.
    #[must_use]
    pub fn content_width(&self) -> i32 {
        self.measurement
            .as_ref()
            .map_or(0, FlowMeasurement::content_width)
    }

    /// Total height of all rows, padding included.
    #[must_use]
    pub fn content_height(&self) -> i32 {
        self.measurement
            .as_ref()
            .map_or(0, FlowMeasurement::content_height)
    }

    /// Child rectangles in content space, in child order.
    #[inline]
    #[must_use]
    pub fn placements(&self) -> &[Rect] {
        &self.placements
    }

    /// Child rectangles in viewport space (shifted up by the scroll offset).
    #[must_use]
    pub fn scrolled_placements(&self) -> Vec<Rect> {
        let offset = self.scroll.offset();
        self.placements.iter().map(|r| r.offset(0, -offset)).collect()
    }

    /// Feed one pointer event. A returned [`GestureEvent::Tap`] is a click.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Vec<GestureEvent> {
        self.scroll.handle_pointer(event)
    }

    /// Advance any fling or spring-back. Returns `true` while the host
    /// should keep ticking.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.scroll.tick(now)
    }

    /// Current scroll offset.
    #[inline]
    #[must_use]
    pub fn scroll_offset(&self) -> i32 {
        self.scroll.offset()
    }

    /// Scroll state (offset and extents).
    #[inline]
    #[must_use]
    pub fn scroll_state(&self) -> &ScrollState {
        self.scroll.scroll()
    }

    /// Jump to `offset`, clamped to the scroll range.
    pub fn scroll_to(&mut self, offset: i32) {
        self.scroll.scroll_to(offset);
    }

    /// Start a fling as if released with `velocity` px/s (positive scrolls
    /// toward the end of the content).
    pub fn fling(&mut self, velocity: f64, now: Instant) {
        self.scroll.fling(velocity, now);
    }

    /// The scroll controller (read-only).
    #[inline]
    #[must_use]
    pub fn controller(&self) -> &ScrollController {
        &self.scroll
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use flowscroll_core::FlingConfig;
    use flowscroll_layout::{Extent, ItemParams};
    use std::time::Duration;

    const MS_16: Duration = Duration::from_millis(16);

    fn chips(n: usize) -> Vec<FlowItem<Size>> {
        (0..n).map(|_| FlowItem::new(Size::new(90, 40))).collect()
    }

    fn container(n: usize) -> FlowContainer<Size> {
        let mut c = FlowContainer::new(FlowConfig::default()).with_items(chips(n));
        c.measure(SizeSpec::Exact(200), SizeSpec::AtMost(300));
        c
    }

    #[test]
    fn measure_feeds_scroll_extents() {
        let c = container(40);
        assert_eq!(c.content_height(), 800);
        assert_eq!(c.scroll_state().viewport_height(), 300);
        assert_eq!(c.scroll_state().max_scroll_range(), 500);
        assert_eq!(c.placements().len(), 40);
    }

    #[test]
    fn drag_shifts_scrolled_placements() {
        let mut c = container(40);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(50.0, 250.0, t));
        c.handle_pointer(&PointerEvent::moved(50.0, 230.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(50.0, 130.0, t + MS_16 * 2));
        assert_eq!(c.scroll_offset(), 100);
        let scrolled = c.scrolled_placements();
        assert_eq!(scrolled[0].y, -100);
        assert_eq!(scrolled[2].y, c.placements()[2].y - 100);
    }

    #[test]
    fn remeasure_with_fewer_children_clamps_offset() {
        let mut c = container(40);
        c.scroll_to(500);
        c.items.truncate(10);
        c.measure(SizeSpec::Exact(200), SizeSpec::AtMost(300));
        // 5 rows of 40 fit in 300: nothing to scroll.
        assert_eq!(c.content_height(), 200);
        assert_eq!(c.scroll_offset(), 0);
    }

    #[test]
    fn fling_runs_to_rest_in_range() {
        let mut c = container(200);
        let t = Instant::now();
        c.scroll_to(1_000);
        c.fling(-2_500.0, t);
        let mut now = t;
        for _ in 0..500 {
            now += MS_16;
            if !c.tick(now) {
                break;
            }
        }
        assert!(c.scroll_offset() < 1_000);
        assert!(c.scroll_offset() >= 0);
        assert!(!c.controller().is_animating());
    }

    #[test]
    fn tap_reaches_host_without_scrolling() {
        let mut c = container(40);
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(20.0, 20.0, t));
        let events = c.handle_pointer(&PointerEvent::up(22.0, 21.0, t + MS_16));
        assert_eq!(events, vec![GestureEvent::Tap { x: 22.0, y: 21.0 }]);
        assert_eq!(c.scroll_offset(), 0);
    }

    #[test]
    fn not_scrollable_measures_children_against_height() {
        let config = FlowConfig::default().with_scrollable(false);
        let mut c = FlowContainer::new(config).with_items(vec![
            FlowItem::new(Size::new(50, 30)),
            FlowItem::new(Size::new(50, 5))
                .with_params(ItemParams::default().with_height(Extent::Fill)),
        ]);
        c.measure(SizeSpec::Exact(200), SizeSpec::Exact(100));
        assert_eq!(c.placements()[1].height, 30);

        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 90.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 10.0, t + MS_16));
        assert_eq!(c.scroll_offset(), 0);
    }

    #[test]
    fn zero_rest_threshold_spring_back_still_settles() {
        let mut fling = FlingConfig::default();
        fling.rest_threshold = 0.0;
        let config = FlowConfig::default().with_fling(fling);
        assert!(config.validate().is_ok());

        let mut c = FlowContainer::new(config).with_items(chips(40));
        c.measure(SizeSpec::Exact(200), SizeSpec::AtMost(300));
        let t = Instant::now();
        c.handle_pointer(&PointerEvent::down(0.0, 10.0, t));
        c.handle_pointer(&PointerEvent::moved(0.0, 30.0, t + MS_16));
        c.handle_pointer(&PointerEvent::moved(0.0, 150.0, t + MS_16 * 2));
        c.handle_pointer(&PointerEvent::up(0.0, 150.0, t + MS_16 * 3));
        assert!(c.scroll_offset() < 0);

        let mut now = t + MS_16 * 3;
        let mut frames = 0;
        while c.tick(now) {
            now += MS_16;
            frames += 1;
            assert!(frames < 1_000, "spring-back never finished");
        }
        assert_eq!(c.scroll_offset(), 0);
        assert!(!c.controller().is_animating());
    }

    #[test]
    fn set_config_applies_new_padding_on_measure() {
        let mut c = container(4);
        c.set_config(FlowConfig::default().with_padding(10));
        c.measure(SizeSpec::Exact(200), SizeSpec::Unbounded);
        assert_eq!(c.placements()[0], Rect::new(10, 10, 90, 40));
        // 20 + 90 + 90 = 200 still fits two per row.
        assert_eq!(c.content_height(), 20 + 80);
    }
}
