//! Per-input debounce configuration.

use serde::{Deserialize, Serialize};

/// Configuration for one logical input: controlled key repeat and double-press detection.
///
/// All durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Emit timed repeats while the key is held instead of mirroring the raw key state.
    pub enable_key_repeat: bool,
    /// Delay between the press edge and the first repeat.
    pub key_repeat_delay: f64,
    /// Delay between subsequent repeats.
    pub key_repeat_interval: f64,
    /// Maximum delay between two press edges that still counts as a double press.
    pub double_press_delay: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_key_repeat: false,
            key_repeat_delay: 0.6,
            key_repeat_interval: 0.4,
            double_press_delay: 0.5,
        }
    }
}

impl InputConfig {
    /// Create the default configuration (raw key state, no repeat).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable controlled key repeat with the given delays.
    #[must_use]
    pub const fn with_key_repeat(mut self, delay: f64, interval: f64) -> Self {
        self.enable_key_repeat = true;
        self.key_repeat_delay = delay;
        self.key_repeat_interval = interval;
        self
    }

    /// Disable controlled key repeat.
    #[must_use]
    pub const fn without_key_repeat(mut self) -> Self {
        self.enable_key_repeat = false;
        self
    }

    /// Set the double-press window.
    #[must_use]
    pub const fn with_double_press_delay(mut self, delay: f64) -> Self {
        self.double_press_delay = delay;
        self
    }
}
