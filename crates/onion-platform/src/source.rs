//! Input source fed by winit events.

use std::sync::Arc;
use std::time::Instant;

use glam::DVec2;
use hashbrown::HashSet;
use onion_input::{InputCallbacks, InputPlatform, KeyCode, MouseButton};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};
use winit::event::{
    DeviceEvent, ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window};

/// Pixels per wheel line when converting touchpad pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

/// Keyboard, mouse and framebuffer state accumulated from winit events.
///
/// winit delivers input as events while the coordinator polls, so this source keeps the
/// latest state of every key and button and answers the coordinator's queries from it.
/// Resize and scroll events are forwarded to the installed [`InputCallbacks`].
///
/// While the cursor is captured, the reported cursor position is virtual: it follows raw
/// device motion and is not clamped to the window, since a locked cursor does not move.
///
/// # Usage
///
/// ```ignore
/// // In window_event
/// source.process_window_event(&event);
///
/// // In device_event
/// source.process_device_event(&event);
/// ```
#[derive(Debug)]
pub struct WinitInputSource {
    window: Option<Arc<Window>>,
    state: RwLock<SourceState>,
    callbacks: Mutex<Option<InputCallbacks>>,
    start: Instant,
}

#[derive(Debug, Default)]
struct SourceState {
    keys: HashSet<KeyCode>,
    buttons: [bool; 5],
    cursor: DVec2,
    framebuffer: (u32, u32),
    captured: bool,
}

impl WinitInputSource {
    /// Create a source for `window`.
    #[must_use]
    pub fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        Self::with_parts(Some(window), (size.width, size.height))
    }

    fn with_parts(window: Option<Arc<Window>>, framebuffer: (u32, u32)) -> Self {
        Self {
            window,
            state: RwLock::new(SourceState {
                framebuffer,
                ..SourceState::default()
            }),
            callbacks: Mutex::new(None),
            start: Instant::now(),
        }
    }

    /// The window this source reads from.
    #[must_use]
    pub const fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    /// Process a window event.
    ///
    /// Returns `true` if the event carried input state.
    pub fn process_window_event(&self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed);
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor(position.x, position.y);
                true
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.set_button(*button, *state == ElementState::Pressed);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll(*delta);
                true
            }
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                true
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                true
            }
            _ => false,
        }
    }

    /// Process a device event (raw mouse motion while captured).
    pub fn process_device_event(&self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.add_raw_motion(delta.0, delta.1);
        }
    }

    fn set_key(&self, key: KeyCode, down: bool) {
        let mut state = self.state.write();
        if down {
            state.keys.insert(key);
        } else {
            state.keys.remove(&key);
        }
    }

    fn set_button(&self, button: WinitMouseButton, down: bool) {
        let Ok(button) = MouseButton::try_from(button) else {
            return;
        };
        self.state.write().buttons[button.index()] = down;
    }

    fn set_cursor(&self, x: f64, y: f64) {
        let mut state = self.state.write();
        if !state.captured {
            state.cursor = DVec2::new(x, y);
        }
    }

    fn add_raw_motion(&self, dx: f64, dy: f64) {
        let mut state = self.state.write();
        if state.captured {
            state.cursor += DVec2::new(dx, dy);
        }
    }

    fn scroll(&self, delta: MouseScrollDelta) {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
            MouseScrollDelta::PixelDelta(pos) => {
                (pos.x / PIXELS_PER_LINE, pos.y / PIXELS_PER_LINE)
            }
        };
        if let Some(callbacks) = self.callbacks.lock().as_ref() {
            callbacks.on_scroll(dx, dy);
        }
    }

    fn resize(&self, width: u32, height: u32) {
        self.state.write().framebuffer = (width, height);
        if let Some(callbacks) = self.callbacks.lock().as_ref() {
            callbacks.on_framebuffer_resized(width, height);
        }
    }

    /// Forget held keys and buttons; release events are not delivered after focus loss.
    fn release_all(&self) {
        let mut state = self.state.write();
        state.keys.clear();
        state.buttons = [false; 5];
    }

    fn apply_cursor_grab(window: &Window, captured: bool) {
        if captured {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                warn!("Failed to grab cursor: {e}");
            }
        } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            warn!("Failed to release cursor: {e}");
        }
        window.set_cursor_visible(!captured);
    }
}

impl InputPlatform for WinitInputSource {
    fn is_key_down(&self, key: KeyCode) -> onion_input::Result<bool> {
        Ok(self.state.read().keys.contains(&key))
    }

    fn cursor_position(&self) -> onion_input::Result<DVec2> {
        Ok(self.state.read().cursor)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> onion_input::Result<bool> {
        Ok(self.state.read().buttons[button.index()])
    }

    fn framebuffer_size(&self) -> onion_input::Result<(u32, u32)> {
        Ok(self.state.read().framebuffer)
    }

    fn monotonic_time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn install_callbacks(&self, callbacks: InputCallbacks) {
        *self.callbacks.lock() = Some(callbacks);
    }

    fn set_cursor_captured(&self, captured: bool) {
        self.state.write().captured = captured;
        if let Some(window) = &self.window {
            Self::apply_cursor_grab(window, captured);
        }
        debug!("Cursor {}", if captured { "captured" } else { "released" });
    }
}

#[cfg(test)]
mod tests {
    use onion_input::InputCoordinator;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    use super::*;

    fn source() -> WinitInputSource {
        WinitInputSource::with_parts(None, (640, 480))
    }

    #[test]
    fn keys_and_buttons() {
        let source = source();
        source.set_key(KeyCode::KeyW, true);
        source.set_button(WinitMouseButton::Left, true);
        source.set_button(WinitMouseButton::Other(7), true);

        assert_eq!(source.is_key_down(KeyCode::KeyW), Ok(true));
        assert_eq!(source.is_mouse_button_down(MouseButton::Left), Ok(true));
        assert_eq!(source.is_mouse_button_down(MouseButton::Right), Ok(false));

        source.set_key(KeyCode::KeyW, false);
        assert_eq!(source.is_key_down(KeyCode::KeyW), Ok(false));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let source = source();
        source.set_key(KeyCode::ShiftLeft, true);
        source.set_button(WinitMouseButton::Right, true);

        assert!(source.process_window_event(&WindowEvent::Focused(false)));
        assert_eq!(source.is_key_down(KeyCode::ShiftLeft), Ok(false));
        assert_eq!(source.is_mouse_button_down(MouseButton::Right), Ok(false));
    }

    #[test]
    fn cursor_is_virtual_while_captured() {
        let source = source();
        source.set_cursor(100.0, 50.0);
        source.add_raw_motion(5.0, 5.0);
        assert_eq!(source.cursor_position(), Ok(DVec2::new(100.0, 50.0)));

        source.set_cursor_captured(true);
        source.set_cursor(320.0, 240.0);
        source.add_raw_motion(5.0, -2.0);
        assert_eq!(source.cursor_position(), Ok(DVec2::new(105.0, 48.0)));
    }

    #[test]
    fn events_reach_coordinator() {
        let input = InputCoordinator::init(source()).unwrap();
        input.poll().unwrap();

        let resized = WindowEvent::Resized(PhysicalSize::new(1024, 768));
        assert!(input.platform().process_window_event(&resized));
        input
            .platform()
            .scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 250.0)));
        input.platform().scroll(MouseScrollDelta::LineDelta(1.0, 0.0));

        input.poll().unwrap();
        let snapshot = input.get_snapshot().unwrap();
        let framebuffer = snapshot.framebuffer();
        assert!(framebuffer.resized);
        assert_eq!((framebuffer.width, framebuffer.height), (1024, 768));
        assert!(snapshot.mouse().scroll_offset_changed);
        assert_eq!(snapshot.mouse().scroll_offset, DVec2::new(1.0, 2.5));
    }

    #[test]
    fn capture_through_coordinator() {
        let input = InputCoordinator::init(source()).unwrap();
        input.platform().set_cursor(10.0, 10.0);
        input.set_capture_enabled(true);
        input.poll().unwrap();

        input.platform().add_raw_motion(4.0, 3.0);
        input.poll().unwrap();
        let mouse = *input.get_snapshot().unwrap().mouse();
        assert!(mouse.movement_offset_changed);
        assert_eq!(mouse.offset, DVec2::new(4.0, -3.0));
    }
}
