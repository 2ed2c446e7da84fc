#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use flowscroll_core::{
    FlingConfig, GestureConfig, Instant, PointerEvent, PointerEventKind, PointerId,
    ScrollController,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Pointer { kind: u8, id: u8, x: i16, y: i16, dt_ms: u8 },
    Tick { dt_ms: u8 },
    Fling { velocity: i16 },
    ScrollTo(i16),
    Extents { content: u16, viewport: u16 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    content: u16,
    viewport: u16,
    scrollable: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    if input.ops.len() > 512 {
        return;
    }
    let mut controller = ScrollController::new(GestureConfig::default(), FlingConfig::default())
        .with_scrollable(input.scrollable);
    controller.set_extents(i32::from(input.content), i32::from(input.viewport));

    let mut now = Instant::now();
    for op in &input.ops {
        match *op {
            Op::Pointer { kind, id, x, y, dt_ms } => {
                now += Duration::from_millis(u64::from(dt_ms));
                let kind = match kind % 4 {
                    0 => PointerEventKind::Down,
                    1 => PointerEventKind::Move,
                    2 => PointerEventKind::Up,
                    _ => PointerEventKind::Cancel,
                };
                let event = PointerEvent::new(kind, f64::from(x), f64::from(y), now)
                    .with_id(PointerId(u32::from(id % 4)));
                controller.handle_pointer(&event);
            }
            Op::Tick { dt_ms } => {
                now += Duration::from_millis(u64::from(dt_ms));
                controller.tick(now);
            }
            Op::Fling { velocity } => controller.fling(f64::from(velocity) * 4.0, now),
            Op::ScrollTo(offset) => controller.scroll_to(i32::from(offset)),
            Op::Extents { content, viewport } => {
                controller.set_extents(i32::from(content), i32::from(viewport));
            }
        }
    }

    // Lift everything, then run any trajectory to rest.
    controller.handle_pointer(&PointerEvent::cancel(now));
    for _ in 0..10_000 {
        now += Duration::from_millis(16);
        if !controller.tick(now) {
            break;
        }
    }
    let scroll = controller.scroll();
    assert!(
        scroll.offset() >= 0 && scroll.offset() <= scroll.max_scroll_range(),
        "offset {} outside 0..={} after settling",
        scroll.offset(),
        scroll.max_scroll_range()
    );
});
