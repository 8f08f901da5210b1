//! Headless platform for driving an input coordinator from tests.

use glam::DVec2;
use hashbrown::HashSet;
use onion_input::{InputCallbacks, InputError, InputPlatform, KeyCode, MouseButton, Result};
use parking_lot::Mutex;

/// Scriptable stand-in for a window.
///
/// Keys, buttons and the cursor are set directly; time only moves when told to. Resize and
/// scroll go through the callbacks the coordinator installed, as a real window would.
#[derive(Debug)]
pub struct HeadlessPlatform {
    state: Mutex<HeadlessState>,
    callbacks: Mutex<Option<InputCallbacks>>,
}

#[derive(Debug)]
struct HeadlessState {
    keys: HashSet<KeyCode>,
    buttons: [bool; 5],
    cursor: DVec2,
    framebuffer: (u32, u32),
    time: f64,
    cursor_captured: bool,
    failure: Option<String>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl HeadlessPlatform {
    /// Create a platform with the given framebuffer size, at time zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Mutex::new(HeadlessState {
                keys: HashSet::new(),
                buttons: [false; 5],
                cursor: DVec2::ZERO,
                framebuffer: (width, height),
                time: 0.0,
                cursor_captured: false,
                failure: None,
            }),
            callbacks: Mutex::new(None),
        }
    }

    /// Hold a key down.
    pub fn press_key(&self, key: KeyCode) {
        self.state.lock().keys.insert(key);
    }

    /// Let a key up.
    pub fn release_key(&self, key: KeyCode) {
        self.state.lock().keys.remove(&key);
    }

    /// Hold or release a key.
    pub fn set_key(&self, key: KeyCode, down: bool) {
        if down {
            self.press_key(key);
        } else {
            self.release_key(key);
        }
    }

    /// Hold or release a mouse button.
    pub fn set_button(&self, button: MouseButton, down: bool) {
        self.state.lock().buttons[button.index()] = down;
    }

    /// Move the cursor to an absolute position.
    pub fn move_cursor(&self, x: f64, y: f64) {
        self.state.lock().cursor = DVec2::new(x, y);
    }

    /// Set the clock, in seconds.
    pub fn set_time(&self, seconds: f64) {
        let mut state = self.state.lock();
        assert!(seconds >= state.time, "headless clock must not go backwards");
        state.time = seconds;
    }

    /// Move the clock forward.
    pub fn advance(&self, seconds: f64) {
        self.state.lock().time += seconds;
    }

    /// Resize the window and notify the installed callbacks.
    pub fn resize(&self, width: u32, height: u32) {
        self.state.lock().framebuffer = (width, height);
        if let Some(callbacks) = self.callbacks.lock().as_ref() {
            callbacks.on_framebuffer_resized(width, height);
        }
    }

    /// Scroll the wheel and notify the installed callbacks.
    pub fn scroll(&self, dx: f64, dy: f64) {
        if let Some(callbacks) = self.callbacks.lock().as_ref() {
            callbacks.on_scroll(dx, dy);
        }
    }

    /// Make every state query fail with `reason` until cleared with `None`.
    pub fn set_failure(&self, reason: Option<&str>) {
        self.state.lock().failure = reason.map(str::to_owned);
    }

    /// Returns `true` if callbacks were installed.
    #[must_use]
    pub fn has_callbacks(&self) -> bool {
        self.callbacks.lock().is_some()
    }

    /// Last cursor capture mode requested by the coordinator.
    #[must_use]
    pub fn is_cursor_captured(&self) -> bool {
        self.state.lock().cursor_captured
    }

    fn query<T>(&self, query: &'static str, read: impl FnOnce(&HeadlessState) -> T) -> Result<T> {
        let state = self.state.lock();
        match &state.failure {
            Some(reason) => Err(InputError::platform(query, reason.clone())),
            None => Ok(read(&state)),
        }
    }
}

impl InputPlatform for HeadlessPlatform {
    fn is_key_down(&self, key: KeyCode) -> Result<bool> {
        self.query("is_key_down", |state| state.keys.contains(&key))
    }

    fn cursor_position(&self) -> Result<DVec2> {
        self.query("cursor_position", |state| state.cursor)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> Result<bool> {
        self.query("is_mouse_button_down", |state| state.buttons[button.index()])
    }

    fn framebuffer_size(&self) -> Result<(u32, u32)> {
        self.query("framebuffer_size", |state| state.framebuffer)
    }

    fn monotonic_time(&self) -> f64 {
        self.state.lock().time
    }

    fn install_callbacks(&self, callbacks: InputCallbacks) {
        tracing::debug!("Headless platform received input callbacks");
        *self.callbacks.lock() = Some(callbacks);
    }

    fn set_cursor_captured(&self, captured: bool) {
        self.state.lock().cursor_captured = captured;
    }
}
