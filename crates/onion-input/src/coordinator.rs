//! Input coordinator: live state, the input registry and the snapshot lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::DVec2;
use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};
use winit::keyboard::KeyCode;

use crate::config::InputConfig;
use crate::debounce::KeyDebouncer;
use crate::error::{InputError, Result};
use crate::mouse::{MouseButton, MouseState};
use crate::platform::{InputCallbacks, InputPlatform};
use crate::snapshot::InputSnapshot;
use crate::state::{FramebufferState, InputId, KeyState};

/// Mouse lock group: the published mouse state plus relative-motion tracking.
#[derive(Debug)]
pub(crate) struct MouseTracker {
    pub(crate) state: MouseState,
    /// The next captured sample only re-anchors `last_position`.
    first_sample: bool,
    last_position: DVec2,
    /// Bumped whenever capture is (re-)enabled.
    capture_epoch: u64,
}

impl MouseTracker {
    fn new() -> Self {
        Self {
            state: MouseState::default(),
            first_sample: true,
            last_position: DVec2::ZERO,
            capture_epoch: 0,
        }
    }

    /// Returns the previous capture flag.
    fn set_capture_enabled(&mut self, enabled: bool) -> bool {
        let was_enabled = self.state.capture_enabled;
        self.state.capture_enabled = enabled;
        if enabled && !was_enabled {
            self.first_sample = true;
            self.capture_epoch += 1;
        }
        was_enabled
    }

    /// Apply a cursor sample taken while `sampled_epoch` was current.
    ///
    /// A sample from before the latest capture enable is stale: it updates the absolute
    /// position only and leaves the re-anchor armed for the next poll.
    fn apply_cursor(&mut self, position: DVec2, sampled_epoch: u64) {
        self.state.position = position;

        if !self.state.capture_enabled || sampled_epoch != self.capture_epoch {
            self.state.movement_offset_changed = false;
            self.state.offset = DVec2::ZERO;
            return;
        }

        if self.first_sample {
            self.last_position = position;
            self.first_sample = false;
        }

        let delta = position - self.last_position;
        if delta == DVec2::ZERO {
            self.state.movement_offset_changed = false;
            self.state.offset = DVec2::ZERO;
        } else {
            // Screen Y grows downwards, offsets grow upwards
            self.state.movement_offset_changed = true;
            self.state.offset = DVec2::new(delta.x, -delta.y);
        }
        self.last_position = position;
    }
}

/// Registered logical inputs.
#[derive(Debug)]
struct InputRegistry {
    next_id: InputId,
    inputs: HashMap<InputId, KeyDebouncer>,
}

/// Raw platform samples for one poll, gathered before any state is touched.
struct MouseSample {
    capture_epoch: u64,
    position: DVec2,
    left: bool,
    right: bool,
}

/// Owns all live input state and publishes one [`InputSnapshot`] per frame.
///
/// Construct with [`InputCoordinator::init`], call [`poll`](Self::poll) once per frame from
/// the render loop, and read the frame's input through [`get_snapshot`](Self::get_snapshot).
/// Framebuffer state, mouse state, the registry and the published snapshot each sit behind
/// their own lock, so platform callbacks only contend with the group they write.
///
/// # Usage
///
/// ```ignore
/// let input = InputCoordinator::init(platform)?;
/// let jump = input.register_input(KeyCode::Space, InputConfig::default());
///
/// loop {
///     input.poll()?;
///     let snapshot = input.get_snapshot()?;
///     if snapshot.key_state(jump)?.is_pressed {
///         // ...
///     }
/// }
/// ```
#[derive(Debug)]
pub struct InputCoordinator<P: InputPlatform> {
    platform: P,
    framebuffer: Arc<Mutex<FramebufferState>>,
    mouse: Arc<Mutex<MouseTracker>>,
    registry: Mutex<InputRegistry>,
    snapshot: RwLock<Option<Arc<InputSnapshot>>>,
    frames: AtomicU64,
}

impl<P: InputPlatform> InputCoordinator<P> {
    /// Bind to a platform: read the initial framebuffer size and install the resize and
    /// scroll callbacks.
    ///
    /// Capture mode starts disabled. The first snapshot reports the initial framebuffer
    /// size as a resize.
    pub fn init(platform: P) -> Result<Self> {
        let (width, height) = platform.framebuffer_size()?;

        let coordinator = Self {
            platform,
            framebuffer: Arc::new(Mutex::new(FramebufferState {
                resized: true,
                width,
                height,
            })),
            mouse: Arc::new(Mutex::new(MouseTracker::new())),
            registry: Mutex::new(InputRegistry {
                next_id: InputId::FIRST,
                inputs: HashMap::new(),
            }),
            snapshot: RwLock::new(None),
            frames: AtomicU64::new(0),
        };

        coordinator.platform.install_callbacks(coordinator.callbacks());
        debug!("Input coordinator initialized ({width}x{height})");

        Ok(coordinator)
    }

    /// The platform this coordinator samples.
    #[must_use]
    pub const fn platform(&self) -> &P {
        &self.platform
    }

    /// A handle to the resize and scroll entry points.
    #[must_use]
    pub fn callbacks(&self) -> InputCallbacks {
        InputCallbacks {
            framebuffer: Arc::clone(&self.framebuffer),
            mouse: Arc::clone(&self.mouse),
        }
    }

    /// Register a logical input bound to `key`.
    ///
    /// Returns a fresh id; ids are never reused.
    pub fn register_input(&self, key: KeyCode, config: InputConfig) -> InputId {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id = id.next();
        registry.inputs.insert(id, KeyDebouncer::new(key, config));
        drop(registry);

        debug!("Registered input {id} for {key:?}");
        id
    }

    /// Register a logical input with the default [`InputConfig`].
    pub fn register_key(&self, key: KeyCode) -> InputId {
        self.register_input(key, InputConfig::default())
    }

    /// Remove an input. Unknown ids are ignored.
    ///
    /// Returns `true` if the input was registered.
    pub fn unregister_input(&self, id: InputId) -> bool {
        let removed = self.registry.lock().inputs.remove(&id).is_some();
        if removed {
            debug!("Unregistered input {id}");
        }
        removed
    }

    /// Returns `true` if `id` is currently registered.
    #[must_use]
    pub fn is_registered(&self, id: InputId) -> bool {
        self.registry.lock().inputs.contains_key(&id)
    }

    /// Number of registered inputs.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registry.lock().inputs.len()
    }

    /// Key and configuration bound to `id`.
    #[must_use]
    pub fn binding(&self, id: InputId) -> Option<(KeyCode, InputConfig)> {
        self.registry
            .lock()
            .inputs
            .get(&id)
            .map(|debouncer| (debouncer.key(), *debouncer.config()))
    }

    /// Sample the platform, advance every debouncer and publish a new snapshot.
    ///
    /// The previously published snapshot is withdrawn first; holders of older snapshots are
    /// unaffected. On a platform failure nothing is published, no input state changes, and
    /// the error is returned.
    pub fn poll(&self) -> Result<()> {
        *self.snapshot.write() = None;

        let now = self.platform.monotonic_time();

        let sample = self.sample_mouse().inspect_err(|e| {
            warn!("Input poll abandoned: {e}");
        })?;
        let keys = self.poll_keys(now).inspect_err(|e| {
            warn!("Input poll abandoned: {e}");
        })?;

        let mouse = {
            let mut tracker = self.mouse.lock();
            tracker.apply_cursor(sample.position, sample.capture_epoch);
            tracker.state.left_button_pressed = sample.left;
            tracker.state.right_button_pressed = sample.right;
            let state = tracker.state;
            tracker.state.reset_one_shot();
            state
        };

        let framebuffer = {
            let mut framebuffer = self.framebuffer.lock();
            let state = *framebuffer;
            framebuffer.resized = false;
            state
        };

        let frame = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = Arc::new(InputSnapshot::new(frame, now, framebuffer, mouse, keys));
        trace!(
            "Published input snapshot {frame} at {now:.3}s ({} inputs)",
            snapshot.len()
        );
        *self.snapshot.write() = Some(snapshot);

        Ok(())
    }

    /// The most recently published snapshot.
    ///
    /// Fails with [`InputError::NotInitialized`] before the first successful poll.
    pub fn get_snapshot(&self) -> Result<Arc<InputSnapshot>> {
        self.snapshot
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or(InputError::NotInitialized)
    }

    /// Enable or disable relative motion capture.
    ///
    /// Enabling from disabled makes the next poll report a zero offset, so a cursor moved
    /// while capture was off does not produce a jump.
    pub fn set_capture_enabled(&self, enabled: bool) {
        let was_enabled = self.mouse.lock().set_capture_enabled(enabled);

        if enabled != was_enabled {
            debug!(
                "Mouse capture {}",
                if enabled { "enabled" } else { "disabled" }
            );
            self.platform.set_cursor_captured(enabled);
        }
    }

    /// Returns `true` if relative motion capture is enabled.
    #[must_use]
    pub fn is_capture_enabled(&self) -> bool {
        self.mouse.lock().state.capture_enabled
    }

    /// Current framebuffer state, read directly rather than from a snapshot.
    #[must_use]
    pub fn get_framebuffer_state(&self) -> FramebufferState {
        *self.framebuffer.lock()
    }

    /// Record a framebuffer resize. See [`InputCallbacks::on_framebuffer_resized`].
    pub fn on_framebuffer_resized(&self, width: u32, height: u32) {
        self.callbacks().on_framebuffer_resized(width, height);
    }

    /// Record a scroll event. See [`InputCallbacks::on_scroll`].
    pub fn on_scroll(&self, dx: f64, dy: f64) {
        self.callbacks().on_scroll(dx, dy);
    }

    fn sample_mouse(&self) -> Result<MouseSample> {
        let capture_epoch = self.mouse.lock().capture_epoch;
        Ok(MouseSample {
            capture_epoch,
            position: self.platform.cursor_position()?,
            left: self.platform.is_mouse_button_down(MouseButton::Left)?,
            right: self.platform.is_mouse_button_down(MouseButton::Right)?,
        })
    }

    /// Sample every registered key, then advance the debouncers. A failed sample leaves
    /// every debouncer untouched.
    fn poll_keys(&self, now: f64) -> Result<HashMap<InputId, KeyState>> {
        let mut registry = self.registry.lock();

        let samples = registry
            .inputs
            .iter()
            .map(|(id, debouncer)| -> Result<(InputId, bool)> {
                Ok((*id, self.platform.is_key_down(debouncer.key())?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut states = HashMap::with_capacity(samples.len());
        for (id, is_down) in samples {
            if let Some(debouncer) = registry.inputs.get_mut(&id) {
                debouncer.update(is_down, now);
                states.insert(id, debouncer.state());
            }
        }

        Ok(states)
    }
}
