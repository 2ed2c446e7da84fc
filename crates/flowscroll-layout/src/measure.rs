#![forbid(unsafe_code)]

//! Line packing and container sizing.
//!
//! [`LineBuilder`] is the greedy packer: footprints go left to right and a
//! new line starts whenever the next footprint would overflow the expected
//! width. [`FlowMeasurer`] drives one or two packing passes to settle the
//! container width, then resolves fill-height children against their rows.
//!
//! # Invariants
//!
//! 1. Every child lands in exactly one line, in order; lines are contiguous
//!    index ranges.
//! 2. A line is only closed early when it already holds a child, so an
//!    oversized child sits alone on its own line instead of looping.
//! 3. A fill-width child is alone on its line.
//! 4. `content_height` equals the sum of line heights plus vertical padding.

use std::ops::Range;

use crate::{Extent, FlowConstraints, FlowItem, Gravity, Measurable, Rect, Sides, Size, SizeSpec};

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// One row of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    items: Range<usize>,
    width: i32,
    height: i32,
}

impl Line {
    /// Indices of the children on this line.
    #[inline]
    #[must_use]
    pub fn items(&self) -> Range<usize> {
        self.items.clone()
    }

    /// Number of children on this line.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the line holds no children (only for an empty flow).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Accumulated width: horizontal padding plus every child's footprint.
    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Tallest footprint on the line.
    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }
}

/// What a child occupies while packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Width including margins.
    pub width: i32,
    /// Height including margins; `None` while the height depends on the row.
    pub height: Option<i32>,
    /// The child must have its line to itself.
    pub exclusive: bool,
}

/// Greedy left-to-right packer.
#[derive(Debug, Clone)]
pub struct LineBuilder {
    expect: Option<i32>,
    padding: i32,
    lines: Vec<Line>,
    start: usize,
    next: usize,
    width: i32,
    height: i32,
}

impl LineBuilder {
    /// Pack into lines no wider than `expect` (`None` never wraps).
    ///
    /// `horizontal_padding` counts toward every line's width.
    #[must_use]
    pub fn new(expect: Option<i32>, horizontal_padding: i32) -> Self {
        let padding = horizontal_padding.max(0);
        Self {
            expect,
            padding,
            lines: Vec::new(),
            start: 0,
            next: 0,
            width: padding,
            height: 0,
        }
    }

    /// Append the next child's footprint.
    pub fn push(&mut self, footprint: Footprint) {
        let fits = self
            .expect
            .is_none_or(|expect| self.width.saturating_add(footprint.width) <= expect);
        if self.next > self.start && (!fits || footprint.exclusive) {
            self.close_line();
        }

        self.width = self.width.saturating_add(footprint.width.max(0));
        if let Some(height) = footprint.height {
            self.height = self.height.max(height);
        }
        self.next += 1;

        if footprint.exclusive {
            self.close_line();
        }
    }

    /// Close the last line and return them all. At least one line is
    /// always returned.
    #[must_use]
    pub fn finish(mut self) -> Vec<Line> {
        if self.next > self.start || self.lines.is_empty() {
            self.close_line();
        }
        self.lines
    }

    fn close_line(&mut self) {
        self.lines.push(Line {
            items: self.start..self.next,
            width: self.width,
            height: self.height,
        });
        self.start = self.next;
        self.width = self.padding;
        self.height = 0;
    }
}

// ---------------------------------------------------------------------------
// Measurement result
// ---------------------------------------------------------------------------

/// A child's measured size with the parameters arrangement needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasuredItem {
    pub size: Size,
    pub margins: Sides,
    pub gravity: Option<Gravity>,
    pub fill_width: bool,
    pub fill_height: bool,
}

/// Immutable output of [`FlowMeasurer::measure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowMeasurement {
    size: Size,
    content_width: i32,
    content_height: i32,
    max_footprint: i32,
    lines: Vec<Line>,
    items: Vec<MeasuredItem>,
    gravity: Gravity,
    padding: Sides,
}

impl FlowMeasurement {
    /// Resolved container size.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resolved container width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    /// Resolved container height (the viewport when scrolling).
    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Widest line, padding included.
    #[inline]
    #[must_use]
    pub fn content_width(&self) -> i32 {
        self.content_width
    }

    /// Sum of line heights plus vertical padding.
    #[inline]
    #[must_use]
    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    /// Widest single non-fill child footprint, padding included.
    #[inline]
    #[must_use]
    pub fn max_footprint(&self) -> i32 {
        self.max_footprint
    }

    /// Finalized lines.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Measured children, in input order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[MeasuredItem] {
        &self.items
    }

    /// Container gravity the measurement was made with.
    #[inline]
    #[must_use]
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Container padding the measurement was made with.
    #[inline]
    #[must_use]
    pub fn padding(&self) -> Sides {
        self.padding
    }

    /// Place every child inside the resolved width.
    #[must_use]
    pub fn arrange(&self) -> Vec<Rect> {
        crate::FlowArranger::new(self.gravity, self.padding).arrange(
            &self.lines,
            &self.items,
            self.size.width,
        )
    }
}

// ---------------------------------------------------------------------------
// FlowMeasurer
// ---------------------------------------------------------------------------

struct Pass {
    lines: Vec<Line>,
    items: Vec<MeasuredItem>,
    content_width: i32,
    max_footprint: i32,
}

/// Resolves the container size and the final line list.
///
/// Stateless: every call works from the items and constraints it is given.
#[derive(Debug, Clone, Default)]
pub struct FlowMeasurer {
    constraints: FlowConstraints,
}

impl FlowMeasurer {
    /// Create a measurer for a container with these constraints.
    #[must_use]
    pub fn new(constraints: FlowConstraints) -> Self {
        Self { constraints }
    }

    /// Container constraints.
    #[inline]
    #[must_use]
    pub fn constraints(&self) -> &FlowConstraints {
        &self.constraints
    }

    /// Measure `items` under the container's `width` and `height` constraints.
    ///
    /// An `Exact` width is taken as given. Otherwise a first pass at the
    /// available width finds the natural width and the widest child; the
    /// container widens to fit that child or narrows to the natural width,
    /// and a second pass at the chosen width produces the final lines.
    pub fn measure<M: Measurable>(
        &self,
        items: &mut [FlowItem<M>],
        width: SizeSpec,
        height: SizeSpec,
    ) -> FlowMeasurement {
        let c = &self.constraints;
        let padding = c.padding.non_negative();
        let child_height = if c.scrollable {
            SizeSpec::Unbounded
        } else {
            height
        };

        let resolved_width = match width {
            SizeSpec::Exact(w) => w.max(0),
            SizeSpec::AtMost(_) | SizeSpec::Unbounded => {
                let available = width.bound().map(|w| w.max(0));
                let mut tentative = available
                    .unwrap_or(i32::MAX)
                    .min(c.max_width.unwrap_or(i32::MAX));
                tentative = tentative.max(c.min_width.unwrap_or(0));

                let first = self.pass(items, available, width, child_height);
                if first.max_footprint > tentative {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        tentative,
                        widest = first.max_footprint,
                        "flow widened to fit widest child"
                    );
                    first.max_footprint
                } else if tentative > first.content_width {
                    first.content_width.max(c.min_width.unwrap_or(0))
                } else {
                    tentative
                }
            }
        };

        let Pass {
            mut lines,
            items: mut items_out,
            content_width,
            max_footprint,
        } = self.pass(
            items,
            Some(resolved_width),
            width.with_bound(resolved_width),
            child_height,
        );

        self.resolve_fill_heights(
            items,
            &mut lines,
            &mut items_out,
            width.with_bound(resolved_width),
            height,
        );

        let lines_height = lines
            .iter()
            .fold(0i32, |acc, line| acc.saturating_add(line.height));
        let content_height = lines_height.saturating_add(padding.vertical_sum());
        let min_height = c.min_height.unwrap_or(0);
        let resolved_height = match height {
            SizeSpec::Exact(h) => h,
            SizeSpec::AtMost(h) => content_height.max(min_height).min(h),
            SizeSpec::Unbounded => content_height.max(min_height),
        }
        .min(c.max_height.unwrap_or(i32::MAX))
        .max(0);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            children = items_out.len(),
            lines = lines.len(),
            width = resolved_width,
            height = resolved_height,
            content_height,
            "flow measured"
        );

        FlowMeasurement {
            size: Size::new(resolved_width, resolved_height),
            content_width,
            content_height,
            max_footprint,
            lines,
            items: items_out,
            gravity: c.gravity,
            padding,
        }
    }

    /// One packing pass at `expect`.
    fn pass<M: Measurable>(
        &self,
        items: &mut [FlowItem<M>],
        expect: Option<i32>,
        width: SizeSpec,
        height: SizeSpec,
    ) -> Pass {
        let padding = self.constraints.padding.non_negative();
        let mut builder = LineBuilder::new(expect, padding.horizontal_sum());
        let mut measured = Vec::with_capacity(items.len());
        let mut max_footprint = 0i32;

        for item in items.iter_mut() {
            let params = item.params;
            let margins = params.margins.non_negative();
            let child_width = width.for_child(
                padding.horizontal_sum().saturating_add(margins.horizontal_sum()),
                params.width,
            );
            let child_height = height.for_child(
                padding.vertical_sum().saturating_add(margins.vertical_sum()),
                params.height,
            );
            let size = sanitize(item.content.measure(child_width, child_height));

            let fill_width = params.fills_width();
            let footprint_width = match expect {
                Some(expect) if fill_width => expect
                    .saturating_sub(padding.horizontal_sum())
                    .saturating_sub(margins.horizontal_sum())
                    .max(0)
                    .saturating_add(margins.horizontal_sum()),
                _ => size.width.saturating_add(margins.horizontal_sum()),
            };
            if !fill_width {
                max_footprint =
                    max_footprint.max(footprint_width.saturating_add(padding.horizontal_sum()));
            }

            let fill_height = params.fills_height();
            builder.push(Footprint {
                width: footprint_width,
                height: (!fill_height).then(|| size.height.saturating_add(margins.vertical_sum())),
                exclusive: fill_width,
            });
            measured.push(MeasuredItem {
                size,
                margins,
                gravity: params.gravity,
                fill_width,
                fill_height,
            });
        }

        let lines = builder.finish();
        let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
        Pass {
            lines,
            items: measured,
            content_width,
            max_footprint,
        }
    }

    /// Give fill-height children their row's height.
    ///
    /// A row holding only fill-height children has no height yet; those
    /// children are first measured as wrap-content against the container's
    /// height constraint to establish one.
    fn resolve_fill_heights<M: Measurable>(
        &self,
        items: &mut [FlowItem<M>],
        lines: &mut [Line],
        measured: &mut [MeasuredItem],
        width: SizeSpec,
        height: SizeSpec,
    ) {
        let padding = self.constraints.padding.non_negative();
        for line in lines.iter_mut() {
            let range = line.items();
            if !measured[range.clone()].iter().any(|m| m.fill_height) {
                continue;
            }

            if line.height == 0 {
                for index in range.clone() {
                    if !measured[index].fill_height {
                        continue;
                    }
                    let margins = measured[index].margins;
                    let child_width = width.for_child(
                        padding.horizontal_sum().saturating_add(margins.horizontal_sum()),
                        items[index].params.width,
                    );
                    let child_height = height.for_child(
                        padding.vertical_sum().saturating_add(margins.vertical_sum()),
                        Extent::Wrap,
                    );
                    let size = sanitize(items[index].content.measure(child_width, child_height));
                    line.height = line
                        .height
                        .max(size.height.saturating_add(margins.vertical_sum()));
                    measured[index].size = size;
                }
            }

            for index in range {
                if !measured[index].fill_height {
                    continue;
                }
                let margins = measured[index].margins;
                let child_width = width.for_child(
                    padding.horizontal_sum().saturating_add(margins.horizontal_sum()),
                    items[index].params.width,
                );
                let row = (line.height - margins.vertical_sum()).max(0);
                measured[index].size =
                    sanitize(items[index].content.measure(child_width, SizeSpec::Exact(row)));
            }
        }
    }
}

/// Clamp negative components reported by a `Measurable` (the `Size` fields
/// are public, so an impl can bypass `Size::new`).
fn sanitize(size: Size) -> Size {
    Size::new(size.width, size.height)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
