//! Hold phase tracking for controlled key repeat.

/// Repeat phase of a held key.
///
/// `since` is the time of the last emitted event (press edge or repeat).
///
/// State transitions:
/// ```text
/// Released ─press()─> PendingFirstRepeat ─tick() ≥ delay─> Repeating ─┐
///     ^                        │                              ^      │ tick() ≥ interval
///     │                     release()                         └──────┘
///     └────────────────────────┴─────────── release() ──────────────────
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HoldPhase {
    /// Key is up.
    #[default]
    Released,
    /// Key is held, waiting for the first repeat.
    PendingFirstRepeat {
        /// Time of the press edge.
        since: f64,
    },
    /// Key is held and repeating at the steady interval.
    Repeating {
        /// Time of the last repeat.
        since: f64,
    },
}

impl HoldPhase {
    /// Returns `true` if the key is held.
    #[inline]
    #[must_use]
    pub const fn is_held(self) -> bool {
        !matches!(self, Self::Released)
    }

    /// Start holding at `now`. No effect if already held.
    #[inline]
    pub fn press(&mut self, now: f64) {
        if !self.is_held() {
            *self = Self::PendingFirstRepeat { since: now };
        }
    }

    /// Advance a held key to `now`.
    ///
    /// Returns `true` when a repeat fires this tick; the timer restarts from `now`.
    pub fn tick(&mut self, now: f64, delay: f64, interval: f64) -> bool {
        match *self {
            Self::Released => false,
            Self::PendingFirstRepeat { since } => {
                if now - since >= delay {
                    *self = Self::Repeating { since: now };
                    true
                } else {
                    false
                }
            }
            Self::Repeating { since } => {
                if now - since >= interval {
                    *self = Self::Repeating { since: now };
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Stop holding and clear the repeat timer.
    #[inline]
    pub fn release(&mut self) {
        *self = Self::Released;
    }
}
