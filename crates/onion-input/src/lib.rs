//! Per-frame input capture for the Onion client.
//!
//! This crate samples raw keyboard, mouse and framebuffer state from a windowing platform,
//! debounces registered keys into press, repeat and double-press events, and publishes an
//! immutable snapshot of everything once per frame.
//!
//! # Core Types
//!
//! - [`InputCoordinator`]: Owns live state and the input registry, publishes snapshots
//! - [`InputSnapshot`]: Immutable input state for one frame, shared as `Arc`
//! - [`InputConfig`]: Per-input key repeat and double-press timing
//! - [`InputPlatform`]: The windowing collaborator the coordinator samples
//!
//! # Usage
//!
//! ```ignore
//! use onion_input::{InputConfig, InputCoordinator, KeyCode};
//!
//! let input = InputCoordinator::init(platform)?;
//! input.set_capture_enabled(true);
//!
//! let forward = input.register_input(
//!     KeyCode::KeyW,
//!     InputConfig::new().with_key_repeat(0.6, 0.4),
//! );
//!
//! // Once per frame, from the render loop
//! input.poll()?;
//! let snapshot = input.get_snapshot()?;
//!
//! if snapshot.key_state(forward)?.is_pressed {
//!     // Step forward
//! }
//!
//! // Camera rotation from captured motion
//! let mouse = snapshot.mouse();
//! if mouse.movement_offset_changed {
//!     camera.rotate(mouse.offset);
//! }
//! ```
//!
//! # Callbacks
//!
//! Resize and scroll are pushed by the platform through [`InputCallbacks`], possibly from a
//! different thread than the one calling [`InputCoordinator::poll`]. They are folded into
//! the next snapshot and then cleared.

mod config;
mod coordinator;
mod debounce;
mod error;
mod mouse;
mod phase;
mod platform;
mod snapshot;
mod state;

pub use config::InputConfig;
pub use coordinator::InputCoordinator;
pub use error::{InputError, Result};
pub use mouse::{MouseButton, MouseState};
pub use platform::{InputCallbacks, InputPlatform};
pub use snapshot::InputSnapshot;
pub use state::{FramebufferState, InputId, KeyState};

// Re-export winit types used in bindings
pub use winit::keyboard::KeyCode;
