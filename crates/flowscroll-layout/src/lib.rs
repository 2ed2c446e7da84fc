#![forbid(unsafe_code)]

//! Wrapping flow layout: children packed left-to-right into rows.
//!
//! Measurement ([`FlowMeasurer`]) produces an immutable [`FlowMeasurement`]
//! holding the finalized lines and every child's measured size; arrangement
//! ([`FlowArranger`]) turns that into one [`Rect`] per child. Both are pure
//! functions of their inputs and may be re-run at will.
//!
//! ```
//! use flowscroll_layout::{FlowConstraints, FlowItem, FlowMeasurer, SizeSpec};
//! use flowscroll_core::Size;
//!
//! let mut items: Vec<FlowItem<Size>> =
//!     (0..3).map(|_| FlowItem::new(Size::new(80, 20))).collect();
//! let measurement = FlowMeasurer::new(FlowConstraints::default())
//!     .measure(&mut items, SizeSpec::Exact(200), SizeSpec::Unbounded);
//! assert_eq!(measurement.line_count(), 2);
//! assert_eq!(measurement.arrange()[2].y, 20);
//! ```

pub mod arrange;
pub mod measure;

pub use arrange::FlowArranger;
pub use flowscroll_core::geometry::{Rect, Sides, Size};
pub use measure::{FlowMeasurement, FlowMeasurer, Footprint, Line, LineBuilder, MeasuredItem};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Size constraints
// ---------------------------------------------------------------------------

/// A constraint on one axis handed to a child's [`Measurable::measure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeSpec {
    /// The child must be exactly this size.
    Exact(i32),
    /// The child may be at most this size.
    AtMost(i32),
    /// No constraint.
    #[default]
    Unbounded,
}

impl SizeSpec {
    /// The bound carried by this constraint, if any.
    #[inline]
    #[must_use]
    pub const fn bound(self) -> Option<i32> {
        match self {
            Self::Exact(n) | Self::AtMost(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// Same mode with a different bound. `Unbounded` stays unbounded.
    #[must_use]
    pub const fn with_bound(self, n: i32) -> Self {
        match self {
            Self::Exact(_) => Self::Exact(n),
            Self::AtMost(_) => Self::AtMost(n),
            Self::Unbounded => Self::Unbounded,
        }
    }

    /// Pick a size for content that would like to be `desired`.
    #[must_use]
    pub fn resolve(self, desired: i32) -> i32 {
        match self {
            Self::Exact(n) => n.max(0),
            Self::AtMost(n) => desired.min(n).max(0),
            Self::Unbounded => desired.max(0),
        }
    }

    /// Compose the constraint for a child from this (parent) constraint.
    ///
    /// `used` is the space the parent consumes around the child on this axis
    /// (padding plus the child's margins).
    #[must_use]
    pub fn for_child(self, used: i32, extent: Extent) -> Self {
        let available = self.bound().map(|n| n.saturating_sub(used).max(0));
        match (extent, self, available) {
            (Extent::Fixed(n), _, _) => Self::Exact(n.max(0)),
            (Extent::Fill, Self::Exact(_), Some(n)) => Self::Exact(n),
            (Extent::Fill | Extent::Wrap, Self::Exact(_) | Self::AtMost(_), Some(n)) => {
                Self::AtMost(n)
            }
            _ => Self::Unbounded,
        }
    }
}

/// Anything that can report its size under a pair of constraints.
///
/// Implementations may report a size larger than an `AtMost` bound; the flow
/// lets such children overflow rather than clipping them.
pub trait Measurable {
    /// Measure under the given width and height constraints.
    fn measure(&mut self, width: SizeSpec, height: SizeSpec) -> Size;
}

/// A rigid box: reports its own size unless told an exact one.
impl Measurable for Size {
    fn measure(&mut self, width: SizeSpec, height: SizeSpec) -> Size {
        let pick = |spec: SizeSpec, own: i32| match spec {
            SizeSpec::Exact(n) => n,
            SizeSpec::AtMost(_) | SizeSpec::Unbounded => own,
        };
        Size::new(pick(width, self.width), pick(height, self.height))
    }
}

/// Adapts a closure into a [`Measurable`].
#[derive(Clone)]
pub struct MeasureFn<F>(pub F);

impl<F> std::fmt::Debug for MeasureFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MeasureFn(..)")
    }
}

impl<F: FnMut(SizeSpec, SizeSpec) -> Size> Measurable for MeasureFn<F> {
    fn measure(&mut self, width: SizeSpec, height: SizeSpec) -> Size {
        (self.0)(width, height)
    }
}

impl<M: Measurable + ?Sized> Measurable for Box<M> {
    fn measure(&mut self, width: SizeSpec, height: SizeSpec) -> Size {
        (**self).measure(width, height)
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Horizontal placement of each row inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    #[default]
    Start,
    End,
    Center,
}

/// Vertical placement of a child inside its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    /// Not specified; behaves as [`VerticalAlign::Top`].
    #[default]
    Unset,
    Top,
    Bottom,
    Center,
}

/// Combined horizontal and vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravity {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Gravity {
    /// Create a gravity from both components.
    #[must_use]
    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The vertical component with `Unset` resolved to `Top`.
    #[inline]
    #[must_use]
    pub const fn effective_vertical(&self) -> VerticalAlign {
        match self.vertical {
            VerticalAlign::Unset => VerticalAlign::Top,
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-child parameters
// ---------------------------------------------------------------------------

/// Requested size of a child along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// As large as the content wants.
    #[default]
    Wrap,
    /// Width: the whole row, alone. Height: the row's height.
    Fill,
    /// Exactly this many pixels.
    Fixed(i32),
}

/// Layout parameters attached to each child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemParams {
    /// Overrides the container's gravity for this child when set.
    pub gravity: Option<Gravity>,
    pub width: Extent,
    pub height: Extent,
    pub margins: Sides,
}

impl ItemParams {
    /// Set the gravity override (builder pattern).
    #[must_use]
    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// Set the width extent (builder pattern).
    #[must_use]
    pub fn with_width(mut self, width: Extent) -> Self {
        self.width = width;
        self
    }

    /// Set the height extent (builder pattern).
    #[must_use]
    pub fn with_height(mut self, height: Extent) -> Self {
        self.height = height;
        self
    }

    /// Set the margins (builder pattern).
    #[must_use]
    pub fn with_margins(mut self, margins: impl Into<Sides>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Whether the child takes a whole row.
    #[inline]
    #[must_use]
    pub fn fills_width(&self) -> bool {
        self.width == Extent::Fill
    }

    /// Whether the child takes its row's height.
    #[inline]
    #[must_use]
    pub fn fills_height(&self) -> bool {
        self.height == Extent::Fill
    }
}

/// A child together with its layout parameters.
#[derive(Debug, Clone, Default)]
pub struct FlowItem<M> {
    pub params: ItemParams,
    pub content: M,
}

impl<M> FlowItem<M> {
    /// Wrap `content` with default (wrap/wrap, no margins) parameters.
    #[must_use]
    pub fn new(content: M) -> Self {
        Self {
            params: ItemParams::default(),
            content,
        }
    }

    /// Replace the parameters (builder pattern).
    #[must_use]
    pub fn with_params(mut self, params: ItemParams) -> Self {
        self.params = params;
        self
    }
}

// ---------------------------------------------------------------------------
// Container constraints
// ---------------------------------------------------------------------------

/// The container's own sizing rules.
///
/// `None` limits are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConstraints {
    pub gravity: Gravity,
    pub min_width: Option<i32>,
    pub max_width: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    pub padding: Sides,
    /// Children are measured with an unbounded height so nothing is clipped
    /// at measurement time.
    pub scrollable: bool,
}

impl Default for FlowConstraints {
    fn default() -> Self {
        Self {
            gravity: Gravity::default(),
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            padding: Sides::default(),
            scrollable: true,
        }
    }
}

impl FlowConstraints {
    /// Set the gravity (builder pattern).
    #[must_use]
    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the padding (builder pattern).
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set the width limits (builder pattern).
    #[must_use]
    pub fn with_width_limits(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Set the height limits (builder pattern).
    #[must_use]
    pub fn with_height_limits(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Set whether the container pans vertically (builder pattern).
    #[must_use]
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_extent_is_exact() {
        let spec = SizeSpec::AtMost(100).for_child(20, Extent::Fixed(300));
        assert_eq!(spec, SizeSpec::Exact(300));
        assert_eq!(SizeSpec::Unbounded.for_child(0, Extent::Fixed(-4)), SizeSpec::Exact(0));
    }

    #[test]
    fn fill_follows_parent_mode() {
        assert_eq!(SizeSpec::Exact(200).for_child(30, Extent::Fill), SizeSpec::Exact(170));
        assert_eq!(SizeSpec::AtMost(200).for_child(30, Extent::Fill), SizeSpec::AtMost(170));
        assert_eq!(SizeSpec::Unbounded.for_child(30, Extent::Fill), SizeSpec::Unbounded);
    }

    #[test]
    fn wrap_is_at_most_available() {
        assert_eq!(SizeSpec::Exact(200).for_child(30, Extent::Wrap), SizeSpec::AtMost(170));
        assert_eq!(SizeSpec::AtMost(10).for_child(30, Extent::Wrap), SizeSpec::AtMost(0));
        assert_eq!(SizeSpec::Unbounded.for_child(30, Extent::Wrap), SizeSpec::Unbounded);
    }

    #[test]
    fn resolve_honors_mode() {
        assert_eq!(SizeSpec::Exact(40).resolve(90), 40);
        assert_eq!(SizeSpec::AtMost(40).resolve(90), 40);
        assert_eq!(SizeSpec::AtMost(40).resolve(10), 10);
        assert_eq!(SizeSpec::Unbounded.resolve(-3), 0);
    }

    #[test]
    fn rigid_size_ignores_at_most() {
        let mut size = Size::new(300, 20);
        assert_eq!(
            size.measure(SizeSpec::AtMost(100), SizeSpec::Unbounded),
            Size::new(300, 20)
        );
        assert_eq!(
            size.measure(SizeSpec::Exact(100), SizeSpec::Exact(7)),
            Size::new(100, 7)
        );
    }

    #[test]
    fn unset_vertical_means_top() {
        let gravity = Gravity::new(HorizontalAlign::Center, VerticalAlign::Unset);
        assert_eq!(gravity.effective_vertical(), VerticalAlign::Top);
    }

    #[test]
    fn params_deserialize_from_snake_case() {
        let json = concat!(
            r#"{"width":"fill","height":{"fixed":40},"#,
            r#""margins":{"left":4},"gravity":{"vertical":"bottom"}}"#,
        );
        let params: ItemParams = serde_json::from_str(json)
        .expect("valid params");
        assert!(params.fills_width());
        assert_eq!(params.height, Extent::Fixed(40));
        assert_eq!(params.margins, Sides::new(4, 0, 0, 0));
        assert_eq!(
            params.gravity,
            Some(Gravity::new(HorizontalAlign::Start, VerticalAlign::Bottom))
        );
    }
}
