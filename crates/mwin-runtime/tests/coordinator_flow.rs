//! End-to-end flows through the coordinator with a recording window system.

use std::thread;

use mwin_core::TouchEvent;
use mwin_layout::testing::RecordingWindowSystem;
use mwin_layout::{Rect, WindowHandle};
use mwin_runtime::{MultiWindow, MultiWindowConfig, TouchDisposition, UserMessage};

const DISPLAY: Rect = Rect::new(0, 40, 1080, 1920);

fn start() -> MultiWindow<RecordingWindowSystem> {
    MultiWindow::new(
        MultiWindowConfig::default(),
        DISPLAY,
        RecordingWindowSystem::new(),
    )
    .expect("start")
}

fn expanded_with_window() -> (MultiWindow<RecordingWindowSystem>, WindowHandle) {
    let mut mw = start();
    let handle = mw.add_window().expect("window");
    mw.toggle();
    assert_eq!(mw.divider_x(), 810);
    (mw, handle)
}

fn window_rect(mw: &MultiWindow<RecordingWindowSystem>, handle: WindowHandle) -> Rect {
    mw.tabs().find_window(handle).expect("window").rect()
}

// --- Divider ---

#[test]
fn divider_ignores_touches_while_collapsed() {
    let mut mw = start();
    mw.add_window().expect("window");
    assert_eq!(
        mw.handle_divider_touch(&TouchEvent::down(1000, 500)),
        TouchDisposition::PassThrough
    );
    assert_eq!(
        mw.handle_divider_touch(&TouchEvent::moved(700, 500)),
        TouchDisposition::PassThrough
    );
    assert_eq!(mw.divider_x(), 1080);
}

#[test]
fn divider_threshold_is_strict() {
    let (mut mw, _) = expanded_with_window();
    mw.handle_divider_touch(&TouchEvent::down(810, 500));

    let disposition = mw.handle_divider_touch(&TouchEvent::moved(785, 500));
    assert_eq!(disposition, TouchDisposition::PassThrough);
    assert_eq!(mw.divider_x(), 810);

    let disposition = mw.handle_divider_touch(&TouchEvent::moved(784, 500));
    assert_eq!(disposition, TouchDisposition::Consumed);
    assert_eq!(mw.divider_x(), 784);
    assert_eq!(mw.former_position(), 784);

    mw.handle_divider_touch(&TouchEvent::up(700, 500));
    assert_eq!(mw.divider_x(), 700);
    assert_eq!(mw.layout().container, Rect::new(700, 40, 1080, 1920));
}

#[test]
fn divider_tap_passes_through() {
    let (mut mw, _) = expanded_with_window();
    mw.handle_divider_touch(&TouchEvent::down(810, 500));
    assert_eq!(
        mw.handle_divider_touch(&TouchEvent::up(812, 500)),
        TouchDisposition::PassThrough
    );
    assert_eq!(mw.divider_x(), 810);
}

#[test]
fn divider_clamps_to_panel_bounds() {
    let (mut mw, _) = expanded_with_window();
    mw.handle_divider_touch(&TouchEvent::down(810, 500));
    mw.handle_divider_touch(&TouchEvent::moved(100, 500));
    assert_eq!(mw.divider_x(), 540);
    mw.handle_divider_touch(&TouchEvent::up(1070, 500));
    assert_eq!(mw.divider_x(), 810);
}

#[test]
fn dragged_position_survives_collapse() {
    let (mut mw, _) = expanded_with_window();
    mw.handle_divider_touch(&TouchEvent::down(810, 500));
    mw.handle_divider_touch(&TouchEvent::moved(650, 500));
    mw.handle_divider_touch(&TouchEvent::up(650, 500));

    mw.toggle();
    assert_eq!(mw.divider_x(), 1080);
    mw.toggle();
    assert_eq!(mw.divider_x(), 650);
}

// --- Proxies ---

#[test]
fn proxies_are_inert_while_docked() {
    let (mut mw, _) = expanded_with_window();
    assert_eq!(
        mw.handle_proxy_touch(&TouchEvent::down(900, 500)),
        TouchDisposition::PassThrough
    );
}

#[test]
fn floating_position_is_restored_after_docking() {
    let mut mw = start();
    let handle = mw.add_window().expect("window");
    mw.toggle_docked();

    let cascade = window_rect(&mw, handle);
    assert_eq!(cascade, Rect::new(392, 228, 886, 1168));

    assert_eq!(
        mw.handle_proxy_touch(&TouchEvent::down(600, 700)),
        TouchDisposition::Consumed
    );
    mw.handle_proxy_touch(&TouchEvent::moved(650, 760));
    assert_eq!(
        mw.dragging_proxy(),
        Some((handle, Rect::new(442, 288, 936, 1228)))
    );
    mw.handle_proxy_touch(&TouchEvent::up(650, 760));
    let chosen = Rect::new(442, 288, 936, 1228);
    assert_eq!(window_rect(&mw, handle), chosen);
    assert_eq!(mw.dragging_proxy(), None);

    mw.toggle_docked();
    assert_eq!(window_rect(&mw, handle), Rect::new(810, 40, 1080, 1920));

    mw.toggle_docked();
    assert_eq!(window_rect(&mw, handle), chosen);
    assert_eq!(mw.window_system().last_rect(handle), Some(chosen));
}

#[test]
fn pinch_scales_proxy() {
    let mut mw = start();
    let handle = mw.add_window().expect("window");
    mw.toggle_docked();
    let before = window_rect(&mw, handle);

    mw.handle_proxy_touch(&TouchEvent::down(500, 600));
    mw.handle_proxy_touch(&TouchEvent::second_down((500, 600), (600, 600)));
    mw.handle_proxy_touch(&TouchEvent::two_finger_move((500, 600), (600, 600)));
    mw.handle_proxy_touch(&TouchEvent::two_finger_move((500, 600), (650, 600)));
    mw.handle_proxy_touch(&TouchEvent::second_up((500, 600)));
    mw.handle_proxy_touch(&TouchEvent::up(500, 600));

    let after = window_rect(&mw, handle);
    assert_eq!(after.origin(), before.origin());
    assert_eq!(after.width(), before.width() * 3 / 2);
    assert_eq!(after.height(), before.height() * 3 / 2);
}

#[test]
fn corner_drag_resizes_from_bottom_right() {
    let mut mw = start();
    let handle = mw.add_window().expect("window");
    mw.toggle_docked();
    let before = window_rect(&mw, handle);

    mw.handle_proxy_touch(&TouchEvent::down(before.right - 10, before.bottom - 10));
    mw.handle_proxy_touch(&TouchEvent::moved(before.right + 40, before.bottom + 90));
    mw.handle_proxy_touch(&TouchEvent::up(before.right + 40, before.bottom + 90));

    let after = window_rect(&mw, handle);
    assert_eq!(after.origin(), before.origin());
    assert_eq!(after.width(), before.width() + 50);
    assert_eq!(after.height(), before.height() + 100);
}

#[test]
fn shrunk_proxy_is_floored_and_restored_after_docking() {
    let mut mw = start();
    let handle = mw.add_window().expect("window");
    mw.toggle_docked();
    let before = window_rect(&mw, handle);

    mw.handle_proxy_touch(&TouchEvent::down(before.left + 10, before.top + 10));
    mw.handle_proxy_touch(&TouchEvent::moved(before.right - 10, before.bottom - 10));
    mw.handle_proxy_touch(&TouchEvent::up(before.right - 10, before.bottom - 10));

    let floored = Rect::new(before.right - 200, before.bottom - 200, before.right, before.bottom);
    assert_eq!(window_rect(&mw, handle), floored);

    mw.toggle_docked();
    mw.toggle_docked();
    let restored = window_rect(&mw, handle);
    assert_eq!(restored, floored);
    assert!(restored.width() >= 200 && restored.height() >= 200);
    assert_eq!(mw.window_system().last_rect(handle), Some(floored));
}

#[test]
fn canceled_proxy_drag_keeps_window() {
    let mut mw = start();
    let handle = mw.add_window().expect("window");
    mw.toggle_docked();
    let before = window_rect(&mw, handle);

    mw.handle_proxy_touch(&TouchEvent::down(600, 700));
    mw.handle_proxy_touch(&TouchEvent::moved(300, 300));
    mw.handle_proxy_touch(&TouchEvent::cancel());
    assert_eq!(window_rect(&mw, handle), before);
    assert_eq!(
        mw.handle_proxy_touch(&TouchEvent::up(300, 300)),
        TouchDisposition::PassThrough
    );
}

#[test]
fn touch_outside_proxies_passes_through() {
    let mut mw = start();
    mw.add_window().expect("window");
    mw.toggle_docked();
    assert_eq!(
        mw.handle_proxy_touch(&TouchEvent::down(10, 100)),
        TouchDisposition::PassThrough
    );
}

// --- Notifications ---

#[test]
fn external_removal_collapses_empty_expanded_panel() {
    let (mut mw, handle) = expanded_with_window();
    let sender = mw.notification_sender();
    thread::spawn(move || sender.window_removed(handle).expect("send"))
        .join()
        .expect("join");

    assert_eq!(mw.pump_notifications(), 1);
    assert!(mw.tabs().find_window(handle).is_none());
    assert_eq!(mw.divider_x(), 1080);
    assert!(!mw.window_system().removed().contains(&handle));
}

#[test]
fn external_relayout_is_remembered_without_echo() {
    let mut mw = start();
    let handle = mw.add_window().expect("window");
    mw.toggle_docked();
    let moved = Rect::new(100, 200, 500, 700);

    let sender = mw.notification_sender();
    thread::spawn(move || sender.window_relayouted(handle, moved).expect("send"))
        .join()
        .expect("join");

    mw.window_system_mut().take_calls();
    assert_eq!(mw.pump_notifications(), 1);
    assert!(mw.window_system().calls().is_empty());
    assert_eq!(window_rect(&mw, handle), moved);

    mw.toggle_docked();
    mw.toggle_docked();
    assert_eq!(window_rect(&mw, handle), moved);
}

#[test]
fn notifications_apply_in_order() {
    let mut mw = start();
    let a = mw.add_window().expect("window");
    let b = mw.add_window().expect("window");
    let sender = mw.notification_sender();

    let worker = thread::spawn(move || {
        sender
            .window_relayouted(b, Rect::new(0, 0, 300, 300))
            .expect("send");
        sender.window_removed(a).expect("send");
        sender.window_removed(WindowHandle::new(9999)).expect("send");
    });
    worker.join().expect("join");

    assert_eq!(mw.pump_notifications(), 3);
    assert!(mw.tabs().find_window(a).is_none());
    assert_eq!(mw.tabs().active_window_count(), 1);
    assert_eq!(mw.pump_notifications(), 0);
}

#[test]
fn sender_fails_after_coordinator_drop() {
    let mw = start();
    let sender = mw.notification_sender();
    drop(mw);
    assert!(sender.window_removed(WindowHandle::new(1)).is_err());
}

// --- Messages ---

#[test]
fn messages_drain_once() {
    let mut mw = start();
    mw.toggle();
    assert_eq!(mw.take_messages(), vec![UserMessage::CantExpandWithoutWindow]);
    assert!(mw.take_messages().is_empty());
}
