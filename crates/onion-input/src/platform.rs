//! Boundary to the windowing platform.
//!
//! The coordinator samples keyboard and mouse state through [`InputPlatform`] once per poll.
//! Resize and scroll arrive the other way, pushed by the platform through the
//! [`InputCallbacks`] handle it receives at initialization.

use std::sync::Arc;

use glam::DVec2;
use parking_lot::Mutex;
use winit::keyboard::KeyCode;

use crate::coordinator::MouseTracker;
use crate::error::Result;
use crate::mouse::MouseButton;
use crate::state::FramebufferState;

/// Windowing/input source queried by the coordinator.
///
/// Implementations must be callable from the polling thread while the same platform
/// delivers callbacks from another thread.
pub trait InputPlatform: Send + Sync {
    /// Whether the physical key is down right now.
    fn is_key_down(&self, key: KeyCode) -> Result<bool>;

    /// Absolute cursor position in window coordinates.
    fn cursor_position(&self) -> Result<DVec2>;

    /// Whether the mouse button is down right now.
    fn is_mouse_button_down(&self, button: MouseButton) -> Result<bool>;

    /// Current framebuffer size in pixels.
    fn framebuffer_size(&self) -> Result<(u32, u32)>;

    /// Monotonic time in seconds. Never decreases.
    fn monotonic_time(&self) -> f64;

    /// Store the entry points to invoke on framebuffer resize and scroll.
    fn install_callbacks(&self, callbacks: InputCallbacks);

    /// Hide and lock the cursor (`true`) or release it (`false`).
    fn set_cursor_captured(&self, captured: bool) {
        let _ = captured;
    }
}

impl<P: InputPlatform + ?Sized> InputPlatform for Arc<P> {
    fn is_key_down(&self, key: KeyCode) -> Result<bool> {
        (**self).is_key_down(key)
    }

    fn cursor_position(&self) -> Result<DVec2> {
        (**self).cursor_position()
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> Result<bool> {
        (**self).is_mouse_button_down(button)
    }

    fn framebuffer_size(&self) -> Result<(u32, u32)> {
        (**self).framebuffer_size()
    }

    fn monotonic_time(&self) -> f64 {
        (**self).monotonic_time()
    }

    fn install_callbacks(&self, callbacks: InputCallbacks) {
        (**self).install_callbacks(callbacks);
    }

    fn set_cursor_captured(&self, captured: bool) {
        (**self).set_cursor_captured(captured);
    }
}

/// Callback entry points handed to the platform.
///
/// Shares the coordinator's framebuffer and mouse lock groups, so invoking a callback from
/// any thread never waits on the key registry or the published snapshot.
#[derive(Debug, Clone)]
pub struct InputCallbacks {
    pub(crate) framebuffer: Arc<Mutex<FramebufferState>>,
    pub(crate) mouse: Arc<Mutex<MouseTracker>>,
}

impl InputCallbacks {
    /// Record a framebuffer resize. Width and height are stored together.
    pub fn on_framebuffer_resized(&self, width: u32, height: u32) {
        let mut framebuffer = self.framebuffer.lock();
        framebuffer.resized = true;
        framebuffer.width = width;
        framebuffer.height = height;
    }

    /// Record a scroll event. Several events before the next poll add up.
    pub fn on_scroll(&self, dx: f64, dy: f64) {
        let mut mouse = self.mouse.lock();
        mouse.state.scroll_offset_changed = true;
        mouse.state.scroll_offset += DVec2::new(dx, dy);
    }
}
