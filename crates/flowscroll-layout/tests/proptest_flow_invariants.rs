//! Property-based invariant tests for flow measurement and arrangement.
//!
//! 1. Every child lands in exactly one line, in order, and lines fit
//! 2. Oversized children sit alone and are never dropped
//! 3. Raising max_width never adds lines
//! 4. Line heights add up to the content height; centered rows are centered
//! 5. Fill-width children own their line and span it

use flowscroll_layout::{
    Extent, FlowConstraints, FlowItem, FlowMeasurement, FlowMeasurer, Gravity, HorizontalAlign,
    ItemParams, Rect, Sides, Size, SizeSpec, VerticalAlign,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn size_strategy() -> impl Strategy<Value = Size> {
    (0i32..150, 0i32..60).prop_map(|(w, h)| Size::new(w, h))
}

fn sizes_strategy() -> impl Strategy<Value = Vec<Size>> {
    prop::collection::vec(size_strategy(), 0..40)
}

fn items(sizes: &[Size]) -> Vec<FlowItem<Size>> {
    sizes.iter().copied().map(FlowItem::new).collect()
}

fn exact(
    constraints: FlowConstraints,
    items: &mut [FlowItem<Size>],
    width: i32,
) -> FlowMeasurement {
    FlowMeasurer::new(constraints).measure(items, SizeSpec::Exact(width), SizeSpec::Unbounded)
}

fn assert_partition(m: &FlowMeasurement, n: usize) -> Result<(), TestCaseError> {
    let mut next = 0;
    for line in m.lines() {
        prop_assert_eq!(line.items().start, next);
        next = line.items().end;
    }
    prop_assert_eq!(next, n);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Packing
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn lines_partition_children_and_fit(
        sizes in sizes_strategy(),
        padding in 0i32..20,
        slack in 0i32..400,
    ) {
        let widest = sizes.iter().map(|s| s.width).max().unwrap_or(0);
        let width = widest + 2 * padding + slack;
        let mut items = items(&sizes);
        let constraints = FlowConstraints::default().with_padding(padding);
        let m = exact(constraints, &mut items, width);

        assert_partition(&m, sizes.len())?;
        for line in m.lines() {
            prop_assert!(line.width() <= width, "line {} > {}", line.width(), width);
        }
        // Greedy: the first child of each later line would not have fit.
        for pair in m.lines().windows(2) {
            let first = sizes[pair[1].items().start].width;
            prop_assert!(pair[0].width() + first > width);
        }
    }

    #[test]
    fn oversized_children_sit_alone(
        sizes in sizes_strategy(),
        width in 1i32..160,
    ) {
        let mut items = items(&sizes);
        let m = exact(FlowConstraints::default(), &mut items, width);
        assert_partition(&m, sizes.len())?;
        for line in m.lines() {
            for index in line.items() {
                if sizes[index].width > width {
                    prop_assert_eq!(line.len(), 1);
                }
            }
        }
        prop_assert_eq!(m.arrange().len(), sizes.len());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Width monotonicity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn wider_max_width_never_adds_lines(
        sizes in sizes_strategy(),
        available in 0i32..2_000,
        max_width in 0i32..1_000,
        extra in 0i32..1_000,
        min_width in prop::option::of(0i32..400),
    ) {
        let measure = |max: i32| {
            let mut items = items(&sizes);
            let constraints = FlowConstraints::default().with_width_limits(min_width, Some(max));
            FlowMeasurer::new(constraints)
                .measure(&mut items, SizeSpec::AtMost(available), SizeSpec::Unbounded)
                .line_count()
        };
        prop_assert!(measure(max_width + extra) <= measure(max_width));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Arrangement consistency
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn rows_stack_to_content_height(
        sizes in sizes_strategy(),
        top in 0i32..20,
        bottom in 0i32..20,
        width in 1i32..600,
        vertical in prop_oneof![
            Just(VerticalAlign::Unset),
            Just(VerticalAlign::Top),
            Just(VerticalAlign::Bottom),
            Just(VerticalAlign::Center),
        ],
    ) {
        let mut items = items(&sizes);
        let constraints = FlowConstraints::default()
            .with_padding(Sides::new(0, top, 0, bottom))
            .with_gravity(Gravity::new(HorizontalAlign::Start, vertical));
        let m = exact(constraints, &mut items, width);
        let rects = m.arrange();

        let sum: i32 = m.lines().iter().map(|l| l.height()).sum();
        prop_assert_eq!(sum + top + bottom, m.content_height());

        let mut line_top = top;
        for line in m.lines() {
            for index in line.items() {
                let rect = rects[index];
                prop_assert!(rect.top() >= line_top, "{rect:?} above {line_top}");
                prop_assert!(rect.bottom() <= line_top + line.height());
            }
            line_top += line.height();
        }
        prop_assert_eq!(line_top + bottom, m.content_height());
    }

    #[test]
    fn centered_rows_are_centered(
        sizes in prop::collection::vec(size_strategy(), 1..40),
        padding in 0i32..20,
        width in 1i32..600,
    ) {
        let mut items = items(&sizes);
        let constraints = FlowConstraints::default()
            .with_padding(Sides::horizontal(padding))
            .with_gravity(Gravity::new(HorizontalAlign::Center, VerticalAlign::Unset));
        let m = exact(constraints, &mut items, width);
        let rects = m.arrange();

        for line in m.lines() {
            let range = line.items();
            let first: Rect = rects[range.start];
            let last: Rect = rects[range.end - 1];
            let doubled_mid = first.left() + last.right();
            prop_assert!((doubled_mid - width).abs() <= 1, "mid*2 {doubled_mid} width {width}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Fill-width exclusivity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn fill_width_children_own_their_line(
        children in prop::collection::vec((size_strategy(), any::<bool>(), 0i32..10), 1..30),
        padding in 0i32..20,
        width in 100i32..600,
    ) {
        let mut items: Vec<FlowItem<Size>> = children
            .iter()
            .map(|&(size, fill, margin)| {
                let mut params = ItemParams::default().with_margins(Sides::horizontal(margin));
                if fill {
                    params = params.with_width(Extent::Fill);
                }
                FlowItem::new(size).with_params(params)
            })
            .collect();
        let constraints = FlowConstraints::default().with_padding(Sides::horizontal(padding));
        let m = exact(constraints, &mut items, width);
        let rects = m.arrange();
        assert_partition(&m, children.len())?;

        for line in m.lines() {
            for index in line.items() {
                let (_, fill, margin) = children[index];
                if fill {
                    prop_assert_eq!(line.len(), 1);
                    prop_assert_eq!(rects[index].width, width - 2 * padding - 2 * margin);
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Concrete scenarios
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn three_equal_chips_make_two_rows() {
    let mut items = items(&[Size::new(80, 20), Size::new(80, 32), Size::new(80, 24)]);
    let m = FlowMeasurer::default().measure(&mut items, SizeSpec::AtMost(200), SizeSpec::Unbounded);
    let ranges: Vec<_> = m.lines().iter().map(|l| l.items()).collect();
    assert_eq!(ranges, vec![0..2, 2..3]);
    assert_eq!(m.width(), 160);
    assert_eq!(m.height(), 32 + 24);
}

#[test]
fn fill_width_between_two_chips_is_alone_and_full() {
    let mut items = items(&[Size::new(60, 20), Size::new(10, 20), Size::new(60, 20)]);
    items[1].params = ItemParams::default().with_width(Extent::Fill);
    let m = FlowMeasurer::default().measure(&mut items, SizeSpec::Exact(200), SizeSpec::Unbounded);
    let rects = m.arrange();
    assert_eq!(m.line_count(), 3);
    assert_eq!(m.lines()[1].items(), 1..2);
    assert_eq!(rects[1], Rect::new(0, 20, 200, 20));
}
