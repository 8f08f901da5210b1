//! Capture mode, relative motion and scroll.

use approx::assert_relative_eq;
use glam::DVec2;
use onion_input::InputCoordinator;
use crate::HeadlessPlatform;

fn coordinator() -> InputCoordinator<HeadlessPlatform> {
    InputCoordinator::init(HeadlessPlatform::default()).unwrap()
}

#[test]
fn position_tracked_without_capture() {
    let input = coordinator();
    input.platform().move_cursor(40.0, 60.0);

    input.poll().unwrap();
    let mouse = *input.get_snapshot().unwrap().mouse();
    assert_eq!(mouse.position, DVec2::new(40.0, 60.0));
    assert!(!mouse.capture_enabled);
    assert!(!mouse.movement_offset_changed);
    assert_eq!(mouse.offset, DVec2::ZERO);
}

#[test]
fn captured_motion_is_relative() {
    let input = coordinator();
    input.platform().move_cursor(100.0, 100.0);
    input.set_capture_enabled(true);

    input.poll().unwrap();
    let mouse = *input.get_snapshot().unwrap().mouse();
    assert!(mouse.capture_enabled);
    assert!(!mouse.movement_offset_changed);

    input.platform().move_cursor(110.0, 95.0);
    input.poll().unwrap();
    let mouse = *input.get_snapshot().unwrap().mouse();
    assert!(mouse.movement_offset_changed);
    assert_relative_eq!(mouse.offset.x, 10.0);
    // Upwards on screen is positive
    assert_relative_eq!(mouse.offset.y, 5.0);

    // No motion: one-shot flag clears
    input.poll().unwrap();
    let mouse = *input.get_snapshot().unwrap().mouse();
    assert!(!mouse.movement_offset_changed);
    assert_eq!(mouse.offset, DVec2::ZERO);
}

#[test]
fn capture_reentry_suppresses_jump() {
    let input = coordinator();
    input.set_capture_enabled(true);
    input.platform().move_cursor(500.0, 500.0);
    input.poll().unwrap();

    input.set_capture_enabled(false);
    input.poll().unwrap();

    input.platform().move_cursor(10.0, 10.0);
    input.set_capture_enabled(true);
    input.poll().unwrap();

    let mouse = *input.get_snapshot().unwrap().mouse();
    assert_eq!(mouse.offset, DVec2::ZERO);
    assert!(!mouse.movement_offset_changed);
    assert_eq!(mouse.position, DVec2::new(10.0, 10.0));

    // Motion after re-entry is measured from the new anchor
    input.platform().move_cursor(13.0, 10.0);
    input.poll().unwrap();
    assert_eq!(input.get_snapshot().unwrap().mouse().offset, DVec2::new(3.0, 0.0));
}

#[test]
fn capture_toggle_reaches_platform() {
    let input = coordinator();
    assert!(!input.platform().is_cursor_captured());

    input.set_capture_enabled(true);
    assert!(input.is_capture_enabled());
    assert!(input.platform().is_cursor_captured());

    input.set_capture_enabled(false);
    assert!(!input.is_capture_enabled());
    assert!(!input.platform().is_cursor_captured());
}

#[test]
fn scroll_is_one_shot() {
    let input = coordinator();
    input.platform().scroll(0.0, 1.0);
    input.platform().scroll(0.5, 2.0);

    input.poll().unwrap();
    let mouse = *input.get_snapshot().unwrap().mouse();
    assert!(mouse.scroll_offset_changed);
    assert_eq!(mouse.scroll_offset, DVec2::new(0.5, 3.0));

    input.poll().unwrap();
    let mouse = *input.get_snapshot().unwrap().mouse();
    assert!(!mouse.scroll_offset_changed);
    assert_eq!(mouse.scroll_offset, DVec2::ZERO);
}

#[test]
fn scroll_through_coordinator_entry_point() {
    let input = coordinator();
    input.on_scroll(-1.0, 0.0);

    input.poll().unwrap();
    let mouse = *input.get_snapshot().unwrap().mouse();
    assert!(mouse.scroll_offset_changed);
    assert_eq!(mouse.scroll_offset, DVec2::new(-1.0, 0.0));
}
