//! Plain per-frame state records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a registered logical input.
///
/// Ids are handed out from 1 upwards and never reused within a process, even after the
/// input they named was unregistered. The 64-bit counter does not run out within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InputId(u64);

impl InputId {
    /// First id handed out by a coordinator.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw id value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Framebuffer dimensions and whether they changed since the last snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramebufferState {
    /// Set by a resize (or initialization) and cleared after being folded into a snapshot.
    pub resized: bool,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for FramebufferState {
    fn default() -> Self {
        Self {
            resized: false,
            width: 800,
            height: 600,
        }
    }
}

impl FramebufferState {
    /// Width over height, or 1.0 for a zero-height (minimized) framebuffer.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Debounced state of one logical input for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyState {
    /// Press edge or repeat this frame (or raw key state when repeat is disabled).
    pub is_pressed: bool,
    /// Second press edge within the double-press delay of the previous one.
    pub is_double_pressed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_continue_past_u32_range() {
        let id = InputId::from_raw(u64::from(u32::MAX));
        assert_eq!(id.next().raw(), u64::from(u32::MAX) + 1);
        assert!(id.next() > id);
    }

    #[test]
    fn display() {
        assert_eq!(InputId::FIRST.to_string(), "#1");
    }
}
