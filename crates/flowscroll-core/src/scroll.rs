#![forbid(unsafe_code)]

//! Vertical scroll position and extents.
//!
//! [`ScrollState`] only knows numbers: the current offset and the content
//! and viewport heights. The layout side writes the extents after each
//! measurement pass; the gesture side moves the offset.
//!
//! # Invariants
//!
//! 1. The valid range is `[0, max(0, content_height - viewport_height)]`.
//! 2. Drags may push the offset outside the valid range (rubber-banding), but
//!    never farther than one viewport height beyond either edge.
//! 3. Outside a gesture or trajectory the offset is in the valid range; the
//!    controller restores it with a spring-back when a gesture ends.

/// Current vertical offset and the extents it is bounded by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    offset: i32,
    content_height: i32,
    viewport_height: i32,
}

impl ScrollState {
    /// Create a state at offset zero. Negative extents are treated as zero.
    #[must_use]
    pub fn new(content_height: i32, viewport_height: i32) -> Self {
        Self {
            offset: 0,
            content_height: content_height.max(0),
            viewport_height: viewport_height.max(0),
        }
    }

    /// Current offset (may be transiently out of range).
    #[inline]
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Total content height, padding included.
    #[inline]
    #[must_use]
    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    /// Visible height of the container.
    #[inline]
    #[must_use]
    pub fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    /// Largest valid offset: `max(0, content_height - viewport_height)`.
    #[inline]
    #[must_use]
    pub fn max_scroll_range(&self) -> i32 {
        self.content_height
            .saturating_sub(self.viewport_height)
            .max(0)
    }

    /// Whether the content is taller than the viewport.
    #[inline]
    #[must_use]
    pub fn can_scroll(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// `offset` clamped to the valid range.
    #[inline]
    #[must_use]
    pub fn clamp(&self, offset: i32) -> i32 {
        offset.clamp(0, self.max_scroll_range())
    }

    /// The current offset clamped to the valid range.
    #[inline]
    #[must_use]
    pub fn clamped_offset(&self) -> i32 {
        self.clamp(self.offset)
    }

    /// Whether the current offset is outside the valid range.
    #[inline]
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.offset != self.clamped_offset()
    }

    /// Distance past the nearest edge: negative above the top, positive past
    /// the bottom, zero in range.
    #[must_use]
    pub fn overscroll(&self) -> i32 {
        self.offset - self.clamped_offset()
    }

    /// Replace both extents. The offset is left untouched.
    pub fn set_extents(&mut self, content_height: i32, viewport_height: i32) {
        self.content_height = content_height.max(0);
        self.viewport_height = viewport_height.max(0);
    }

    /// Set the offset as-is (trajectory output, restoring a saved position).
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    /// Move the offset by a drag delta, rubber-banding past the edges.
    ///
    /// The result stays within one viewport height beyond either edge.
    /// Returns the distance actually moved.
    pub fn drag_by(&mut self, delta: i32) -> i32 {
        let band = self.viewport_height;
        let low = -band;
        let high = self.max_scroll_range().saturating_add(band);
        let before = self.offset;
        self.offset = self.offset.saturating_add(delta).clamp(low, high.max(low));
        self.offset - before
    }

    /// Snap the offset into the valid range. Returns whether it changed.
    pub fn settle(&mut self) -> bool {
        let clamped = self.clamped_offset();
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollState;

    #[test]
    fn range_is_zero_when_content_fits() {
        let state = ScrollState::new(300, 500);
        assert_eq!(state.max_scroll_range(), 0);
        assert!(!state.can_scroll());
        assert_eq!(state.clamp(40), 0);
    }

    #[test]
    fn negative_extents_are_clamped() {
        let state = ScrollState::new(-10, -5);
        assert_eq!(state.content_height(), 0);
        assert_eq!(state.viewport_height(), 0);
    }

    #[test]
    fn drag_rubber_bands_within_one_viewport() {
        let mut state = ScrollState::new(1_000, 400);
        assert_eq!(state.drag_by(-150), -150);
        assert!(state.is_out_of_range());
        assert_eq!(state.overscroll(), -150);

        // Can't go past one viewport above the top.
        state.drag_by(-1_000);
        assert_eq!(state.offset(), -400);

        state.set_offset(600);
        state.drag_by(10_000);
        assert_eq!(state.offset(), 1_000);
        assert_eq!(state.overscroll(), 400);
    }

    #[test]
    fn settle_clamps_into_range() {
        let mut state = ScrollState::new(1_000, 400);
        state.set_offset(750);
        assert!(state.settle());
        assert_eq!(state.offset(), 600);
        assert!(!state.settle());
    }

    #[test]
    fn set_extents_keeps_offset() {
        let mut state = ScrollState::new(1_000, 400);
        state.set_offset(500);
        state.set_extents(700, 400);
        assert_eq!(state.offset(), 500);
        assert!(state.is_out_of_range());
        assert_eq!(state.clamped_offset(), 300);
    }
}
