//! Framebuffer resize handling, including resizes racing a poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use onion_input::InputCoordinator;
use crate::HeadlessPlatform;

#[test]
fn first_snapshot_reports_initial_size() {
    let input = InputCoordinator::init(HeadlessPlatform::new(1024, 768)).unwrap();

    input.poll().unwrap();
    let framebuffer = *input.get_snapshot().unwrap().framebuffer();
    assert!(framebuffer.resized);
    assert_eq!((framebuffer.width, framebuffer.height), (1024, 768));

    input.poll().unwrap();
    assert!(!input.get_snapshot().unwrap().framebuffer().resized);
    assert!(!input.get_framebuffer_state().resized);
}

#[test]
fn resize_is_one_shot() {
    let input = InputCoordinator::init(HeadlessPlatform::default()).unwrap();
    input.poll().unwrap();

    input.platform().resize(1920, 1080);
    assert!(input.get_framebuffer_state().resized);

    input.poll().unwrap();
    let framebuffer = *input.get_snapshot().unwrap().framebuffer();
    assert!(framebuffer.resized);
    assert_eq!((framebuffer.width, framebuffer.height), (1920, 1080));

    input.poll().unwrap();
    let framebuffer = *input.get_snapshot().unwrap().framebuffer();
    assert!(!framebuffer.resized);
    assert_eq!((framebuffer.width, framebuffer.height), (1920, 1080));
}

#[test]
fn zero_height_aspect_ratio() {
    let input = InputCoordinator::init(HeadlessPlatform::default()).unwrap();
    input.on_framebuffer_resized(300, 0);

    let framebuffer = input.get_framebuffer_state();
    assert!((framebuffer.aspect_ratio() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn concurrent_resize_is_never_torn() {
    const SIZES: [(u32, u32); 3] = [(800, 600), (100, 200), (3000, 4000)];

    let input = Arc::new(InputCoordinator::init(HeadlessPlatform::new(800, 600)).unwrap());
    let callbacks = input.callbacks();
    let done = Arc::new(AtomicBool::new(false));

    let resizer = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut i = 0;
            while !done.load(Ordering::Relaxed) {
                let (width, height) = SIZES[1 + i % 2];
                callbacks.on_framebuffer_resized(width, height);
                i += 1;
            }
        })
    };

    for _ in 0..2000 {
        input.poll().unwrap();
        let framebuffer = *input.get_snapshot().unwrap().framebuffer();
        assert!(
            SIZES.contains(&(framebuffer.width, framebuffer.height)),
            "torn framebuffer {}x{}",
            framebuffer.width,
            framebuffer.height
        );

        let direct = input.get_framebuffer_state();
        assert!(SIZES.contains(&(direct.width, direct.height)));
    }

    done.store(true, Ordering::Relaxed);
    resizer.join().unwrap();
}
