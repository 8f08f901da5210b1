//! Error types for input capture.

use thiserror::Error;

use crate::state::InputId;

/// Errors reported by the input coordinator and its snapshots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No snapshot has been published yet.
    #[error("input snapshot is not initialized, call poll() before get_snapshot()")]
    NotInitialized,

    /// The id is absent from the snapshot's key states.
    #[error("unknown input id {0}")]
    UnknownInputId(InputId),

    /// The platform could not answer a state query.
    #[error("platform query `{query}` failed: {reason}")]
    PlatformQuery {
        /// Name of the failed query.
        query: &'static str,
        /// Platform-provided reason.
        reason: String,
    },
}

impl InputError {
    /// Build a platform query failure.
    pub fn platform(query: &'static str, reason: impl Into<String>) -> Self {
        Self::PlatformQuery {
            query,
            reason: reason.into(),
        }
    }
}

/// Result type alias using [`InputError`].
pub type Result<T> = std::result::Result<T, InputError>;
