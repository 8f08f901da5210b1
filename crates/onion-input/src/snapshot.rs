//! Immutable per-frame input snapshots.

use hashbrown::HashMap;

use crate::error::{InputError, Result};
use crate::mouse::MouseState;
use crate::state::{FramebufferState, InputId, KeyState};

/// All input state valid for exactly one frame.
///
/// Built in full by [`InputCoordinator::poll`](crate::InputCoordinator::poll) and shared as
/// `Arc<InputSnapshot>`. A snapshot is never mutated after publication; holders may keep it
/// alive across later polls.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    frame: u64,
    time: f64,
    framebuffer: FramebufferState,
    mouse: MouseState,
    keys: HashMap<InputId, KeyState>,
}

impl InputSnapshot {
    pub(crate) fn new(
        frame: u64,
        time: f64,
        framebuffer: FramebufferState,
        mouse: MouseState,
        keys: HashMap<InputId, KeyState>,
    ) -> Self {
        Self {
            frame,
            time,
            framebuffer,
            mouse,
            keys,
        }
    }

    /// Poll number that produced this snapshot, starting at 1.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Monotonic time of the poll, in seconds.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Framebuffer state at poll time.
    #[must_use]
    pub const fn framebuffer(&self) -> &FramebufferState {
        &self.framebuffer
    }

    /// Mouse state at poll time.
    #[must_use]
    pub const fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Debounced state of a registered input.
    ///
    /// Fails with [`InputError::UnknownInputId`] if `id` was not registered when this
    /// snapshot was built.
    pub fn key_state(&self, id: InputId) -> Result<KeyState> {
        self.keys
            .get(&id)
            .copied()
            .ok_or(InputError::UnknownInputId(id))
    }

    /// Returns `true` if `id` has a state in this snapshot.
    #[must_use]
    pub fn contains(&self, id: InputId) -> bool {
        self.keys.contains_key(&id)
    }

    /// All key states, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = (InputId, KeyState)> + '_ {
        self.keys.iter().map(|(id, state)| (*id, *state))
    }

    /// Number of inputs in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no inputs were registered at poll time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
