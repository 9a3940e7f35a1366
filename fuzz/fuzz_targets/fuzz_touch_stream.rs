#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mwin_core::{
    DividerDrag, DividerDragConfig, DividerDragEffect, DividerRange, ProxyDrag, ProxyDragConfig,
    ProxyDragEffect, Rect, TouchEvent,
};
use mwin_layout::{LayoutMode, SolverInput, compute_layout};

#[derive(Debug, Arbitrary)]
enum Touch {
    Down(i16, i16),
    Move(i16, i16),
    Up(i16, i16),
    SecondDown(i16, i16, i16, i16),
    TwoFingerMove(i16, i16, i16, i16),
    SecondUp(i16, i16),
    Cancel,
}

impl Touch {
    fn event(&self) -> TouchEvent {
        let p = |v: i16| i32::from(v);
        match *self {
            Self::Down(x, y) => TouchEvent::down(p(x), p(y)),
            Self::Move(x, y) => TouchEvent::moved(p(x), p(y)),
            Self::Up(x, y) => TouchEvent::up(p(x), p(y)),
            Self::SecondDown(a, b, c, d) => TouchEvent::second_down((p(a), p(b)), (p(c), p(d))),
            Self::TwoFingerMove(a, b, c, d) => {
                TouchEvent::two_finger_move((p(a), p(b)), (p(c), p(d)))
            }
            Self::SecondUp(x, y) => TouchEvent::second_up((p(x), p(y))),
            Self::Cancel => TouchEvent::cancel(),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    width: u16,
    height: u16,
    right_side: bool,
    docked: bool,
    floating_edit: bool,
    window_count: u8,
    threshold: u8,
    touches: Vec<Touch>,
}

fuzz_target!(|input: Input| {
    let width = i32::from(input.width.max(64));
    let height = i32::from(input.height.max(64));
    let display = Rect::new(0, 0, width, height);
    let range = DividerRange::anchored(display, input.right_side, width / 4, width / 2);

    let mut divider = DividerDrag::new(DividerDragConfig {
        threshold: i32::from(input.threshold),
    });
    divider.set_resizing_enabled(input.docked);
    let mut proxy = ProxyDrag::new(ProxyDragConfig::default());
    let mut proxy_rect = Rect::new(width / 4, height / 4, width * 3 / 4, height * 3 / 4);
    let mut divider_x = if input.right_side { width } else { 0 };

    for touch in input.touches.iter().take(256) {
        let event = touch.event();

        match divider.process(&event, &range) {
            DividerDragEffect::DragStarted { x }
            | DividerDragEffect::DragUpdated { x }
            | DividerDragEffect::Committed { x } => {
                assert!(x >= range.min_x && x <= range.max_x, "divider {x} escaped range");
                divider_x = x;
            }
            _ => {}
        }

        match proxy.process(&event, proxy_rect) {
            ProxyDragEffect::Moved { rect } | ProxyDragEffect::Released { rect } => {
                assert!(rect.is_well_formed(), "inverted proxy {rect:?}");
                proxy_rect = rect;
            }
            _ => {}
        }

        let solved = compute_layout(&SolverInput {
            display,
            divider_x,
            panel_width: 96,
            mode: LayoutMode {
                docked: input.docked,
                right_side: input.right_side,
                expanded: input.docked,
                floating_edit: input.floating_edit,
            },
            active_window_count: usize::from(input.window_count % 5),
        });
        assert!(solved.divider_x >= display.left && solved.divider_x <= display.right);
        assert!(solved.panel.is_well_formed());
        assert!(solved.primary.is_well_formed());
        assert!(solved.container.is_well_formed());
    }
});
