#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are signed pixels. Arranged children may legitimately sit
//! at negative offsets (a centered row wider than its container), so nothing
//! here clamps to zero except where a quantity is a size.

use serde::{Deserialize, Serialize};

/// A width/height pair. Both components are kept non-negative by [`Size::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Zero-sized value.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a size, treating negative components as zero.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Whether either dimension is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

/// A placed rectangle in container content space (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its four edges.
    #[inline]
    #[must_use]
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Size of the rectangle.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Translate the rectangle by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Horizontal midpoint, rounded toward negative infinity.
    #[inline]
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.x.saturating_add(self.width.div_euclid(2))
    }
}

/// Sides for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Sides {
    /// Create new sides with equal values.
    #[must_use]
    pub const fn all(val: i32) -> Self {
        Self {
            left: val,
            top: val,
            right: val,
            bottom: val,
        }
    }

    /// Create new sides with horizontal values only.
    #[must_use]
    pub const fn horizontal(val: i32) -> Self {
        Self {
            left: val,
            top: 0,
            right: val,
            bottom: 0,
        }
    }

    /// Create new sides with vertical values only.
    #[must_use]
    pub const fn vertical(val: i32) -> Self {
        Self {
            left: 0,
            top: val,
            right: 0,
            bottom: val,
        }
    }

    /// Create new sides in left, top, right, bottom order.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Copy of these sides with negative values replaced by zero.
    #[must_use]
    pub const fn non_negative(self) -> Self {
        const fn z(v: i32) -> i32 {
            if v < 0 { 0 } else { v }
        }
        Self::new(z(self.left), z(self.top), z(self.right), z(self.bottom))
    }

    /// Sum of left and right.
    #[inline]
    #[must_use]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    #[must_use]
    pub const fn vertical_sum(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<i32> for Sides {
    fn from(val: i32) -> Self {
        Self::all(val)
    }
}

impl From<(i32, i32)> for Sides {
    fn from((vertical, horizontal): (i32, i32)) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Sides, Size};

    #[test]
    fn size_clamps_negative_components() {
        assert_eq!(Size::new(-3, 7), Size::new(0, 7));
        assert_eq!(Size::from((4, -1)), Size::new(4, 0));
        assert!(Size::new(0, 5).is_empty());
    }

    #[test]
    fn rect_edges_round_trip() {
        let rect = Rect::from_edges(-10, 4, 30, 24);
        assert_eq!(rect, Rect::new(-10, 4, 40, 20));
        assert_eq!(rect.right(), 30);
        assert_eq!(rect.bottom(), 24);
        assert_eq!(rect.center_x(), 10);
    }

    #[test]
    fn rect_offset_moves_origin_only() {
        let rect = Rect::new(2, 3, 4, 5).offset(1, -10);
        assert_eq!(rect, Rect::new(3, -7, 4, 5));
        assert!(rect.contains(3, -7));
        assert!(!rect.contains(7, -7));
    }

    #[test]
    fn sides_sums_and_clamp() {
        let sides = Sides::new(4, 1, 2, 3);
        assert_eq!(sides.horizontal_sum(), 6);
        assert_eq!(sides.vertical_sum(), 4);
        assert_eq!(Sides::new(-1, 2, -3, 4).non_negative(), Sides::new(0, 2, 0, 4));
        assert_eq!(Sides::from((1, 2)), Sides::new(2, 1, 2, 1));
    }
}
