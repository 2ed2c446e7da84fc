#![forbid(unsafe_code)]

//! Child placement from a finished measurement.

use crate::measure::{Line, MeasuredItem};
use crate::{Gravity, HorizontalAlign, Rect, Sides, VerticalAlign};

/// Places measured children row by row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowArranger {
    gravity: Gravity,
    padding: Sides,
}

impl FlowArranger {
    /// Create an arranger for a container with this gravity and padding.
    #[must_use]
    pub fn new(gravity: Gravity, padding: Sides) -> Self {
        Self { gravity, padding }
    }

    /// Compute one rectangle per measured child, in child order.
    ///
    /// Rows are aligned horizontally by the container gravity; each child is
    /// aligned vertically inside its row by its own gravity if it has one,
    /// otherwise the container's. A fill-width child stretches to the right
    /// padding edge whatever its measured width.
    #[must_use]
    pub fn arrange(
        &self,
        lines: &[Line],
        items: &[MeasuredItem],
        container_width: i32,
    ) -> Vec<Rect> {
        let padding = self.padding;
        let mut placed = Vec::with_capacity(items.len());
        let mut line_top = padding.top;

        for line in lines {
            let slack = container_width.saturating_sub(line.width());
            let mut left = match self.gravity.horizontal {
                HorizontalAlign::Start => padding.left,
                HorizontalAlign::End => slack.saturating_add(padding.left),
                HorizontalAlign::Center => (slack / 2).saturating_add(padding.left),
            };

            for item in &items[line.items()] {
                placed.push(self.place(item, line, line_top, &mut left, container_width));
            }
            line_top = line_top.saturating_add(line.height());
        }
        placed
    }

    fn place(
        &self,
        item: &MeasuredItem,
        line: &Line,
        line_top: i32,
        left: &mut i32,
        container_width: i32,
    ) -> Rect {
        let margins = item.margins;
        let size = item.size;
        *left = left.saturating_add(margins.left);

        let gravity = item.gravity.unwrap_or(self.gravity);
        let top = match gravity.effective_vertical() {
            VerticalAlign::Bottom => line_top
                .saturating_add(line.height())
                .saturating_sub(margins.bottom)
                .saturating_sub(size.height),
            VerticalAlign::Center => {
                let free = line
                    .height()
                    .saturating_sub(margins.vertical_sum())
                    .saturating_sub(size.height);
                line_top.saturating_add(margins.top).saturating_add(free / 2)
            }
            VerticalAlign::Top | VerticalAlign::Unset => line_top.saturating_add(margins.top),
        };

        let right = if item.fill_width {
            container_width
                .saturating_sub(self.padding.right)
                .saturating_sub(margins.right)
        } else {
            left.saturating_add(size.width)
        };
        let rect = Rect::from_edges(*left, top, right.max(*left), top.saturating_add(size.height));
        *left = left.saturating_add(size.width).saturating_add(margins.right);
        rect
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
