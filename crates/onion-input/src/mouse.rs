//! Mouse state record and button identifiers.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use winit::event::MouseButton as WinitMouseButton;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    /// Every button, in index order.
    pub const ALL: [Self; 5] = [
        Self::Left,
        Self::Right,
        Self::Middle,
        Self::Back,
        Self::Forward,
    ];

    /// Dense index for per-button tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            WinitMouseButton::Back => Ok(Self::Back),
            WinitMouseButton::Forward => Ok(Self::Forward),
            WinitMouseButton::Other(_) => Err(()),
        }
    }
}

/// Mouse state for one frame.
///
/// The `*_changed` flags and their offsets are one-shot: they describe what happened since
/// the previous poll and are cleared once folded into a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MouseState {
    /// Relative motion capture is enabled (cursor hidden and locked).
    pub capture_enabled: bool,
    /// The cursor moved while capture was enabled.
    pub movement_offset_changed: bool,
    /// Motion since the previous poll. Y grows upwards. Only meaningful under capture.
    pub offset: DVec2,
    /// Absolute cursor position in window coordinates.
    pub position: DVec2,
    /// Scroll events arrived since the previous poll.
    pub scroll_offset_changed: bool,
    /// Scroll amount since the previous poll.
    pub scroll_offset: DVec2,
    /// Left button is held.
    pub left_button_pressed: bool,
    /// Right button is held.
    pub right_button_pressed: bool,
}

impl MouseState {
    /// Clear the one-shot flags and their offsets.
    pub fn reset_one_shot(&mut self) {
        self.movement_offset_changed = false;
        self.offset = DVec2::ZERO;
        self.scroll_offset_changed = false;
        self.scroll_offset = DVec2::ZERO;
    }
}
