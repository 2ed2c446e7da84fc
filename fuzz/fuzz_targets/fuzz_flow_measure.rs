#![no_main]

use arbitrary::Arbitrary;
use flowscroll_layout::{
    Extent, FlowConstraints, FlowItem, FlowMeasurer, Gravity, HorizontalAlign, ItemParams, Sides,
    Size, SizeSpec, VerticalAlign,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Child {
    width: u16,
    height: u16,
    fill_width: bool,
    fill_height: bool,
    margin: u8,
}

#[derive(Arbitrary, Debug)]
struct Input {
    width_mode: u8,
    width: u16,
    height_mode: u8,
    height: u16,
    padding: u8,
    align: u8,
    scrollable: bool,
    children: Vec<Child>,
}

fn spec(mode: u8, value: u16) -> SizeSpec {
    let value = i32::from(value % 4096);
    match mode % 3 {
        0 => SizeSpec::Exact(value),
        1 => SizeSpec::AtMost(value),
        _ => SizeSpec::Unbounded,
    }
}

fuzz_target!(|input: Input| {
    if input.children.len() > 256 {
        return;
    }
    let horizontal = match input.align % 3 {
        0 => HorizontalAlign::Start,
        1 => HorizontalAlign::End,
        _ => HorizontalAlign::Center,
    };
    let constraints = FlowConstraints::default()
        .with_gravity(Gravity::new(horizontal, VerticalAlign::Center))
        .with_padding(i32::from(input.padding % 64))
        .with_scrollable(input.scrollable);

    let mut items: Vec<FlowItem<Size>> = input
        .children
        .iter()
        .map(|c| {
            let params = ItemParams::default()
                .with_width(if c.fill_width { Extent::Fill } else { Extent::Wrap })
                .with_height(if c.fill_height { Extent::Fill } else { Extent::Wrap })
                .with_margins(Sides::all(i32::from(c.margin % 32)));
            FlowItem::new(Size::new(i32::from(c.width % 2048), i32::from(c.height % 2048)))
                .with_params(params)
        })
        .collect();

    let width = spec(input.width_mode, input.width);
    let height = spec(input.height_mode, input.height);
    let measurement = FlowMeasurer::new(constraints).measure(&mut items, width, height);

    // Post-conditions that must always hold:
    if let SizeSpec::Exact(w) = width {
        assert_eq!(measurement.width(), w, "exact width not honored");
    }
    if let SizeSpec::Exact(h) = height {
        assert_eq!(measurement.height(), h, "exact height not honored");
    }
    assert!(measurement.width() >= 0 && measurement.height() >= 0);

    // Lines partition the children in order.
    let mut next = 0;
    for line in measurement.lines() {
        assert_eq!(line.items().start, next, "lines skip or repeat children");
        next = line.items().end;
    }
    assert_eq!(next, items.len(), "lines don't cover every child");

    let line_sum: i32 = measurement.lines().iter().map(|l| l.height()).sum();
    assert_eq!(
        measurement.content_height(),
        line_sum + measurement.padding().vertical_sum()
    );

    let placements = measurement.arrange();
    assert_eq!(placements.len(), items.len());
    for rect in &placements {
        assert!(rect.width >= 0 && rect.height >= 0, "negative placement {rect:?}");
    }
});
