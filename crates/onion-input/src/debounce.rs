//! Per-input debouncing: press edges, controlled repeat and double presses.

use winit::keyboard::KeyCode;

use crate::config::InputConfig;
use crate::phase::HoldPhase;
use crate::state::KeyState;

/// Turns raw "is the key down" samples into a debounced [`KeyState`].
///
/// One debouncer exists per registered logical input and lives in the coordinator's
/// registry. `update` is called once per poll with the poll's shared timestamp.
#[derive(Debug, Clone)]
pub(crate) struct KeyDebouncer {
    key: KeyCode,
    config: InputConfig,
    was_down: bool,
    phase: HoldPhase,
    /// Time of the last press edge that did not complete a double press.
    double_press_anchor: Option<f64>,
    state: KeyState,
}

impl KeyDebouncer {
    pub(crate) fn new(key: KeyCode, config: InputConfig) -> Self {
        Self {
            key,
            config,
            was_down: false,
            phase: HoldPhase::Released,
            double_press_anchor: None,
            state: KeyState::default(),
        }
    }

    /// Physical key this input is bound to.
    pub(crate) const fn key(&self) -> KeyCode {
        self.key
    }

    pub(crate) const fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Debounced state computed by the last `update`.
    pub(crate) const fn state(&self) -> KeyState {
        self.state
    }

    /// Feed one raw sample taken at `now` (seconds).
    pub(crate) fn update(&mut self, is_down: bool, now: f64) {
        let press_edge = is_down && !self.was_down;

        self.state.is_pressed = if !self.config.enable_key_repeat {
            is_down
        } else if press_edge {
            self.phase.release();
            self.phase.press(now);
            true
        } else if is_down {
            self.phase.tick(
                now,
                self.config.key_repeat_delay,
                self.config.key_repeat_interval,
            )
        } else {
            self.phase.release();
            false
        };

        self.state.is_double_pressed = press_edge && self.register_press_edge(now);
        self.was_down = is_down;
    }

    /// Returns `true` if this edge completes a double press. A completed double press
    /// consumes the anchor, so the next edge opens a new window.
    fn register_press_edge(&mut self, now: f64) -> bool {
        match self.double_press_anchor {
            Some(anchor) if now - anchor <= self.config.double_press_delay => {
                self.double_press_anchor = None;
                true
            }
            _ => {
                self.double_press_anchor = Some(now);
                false
            }
        }
    }
}
