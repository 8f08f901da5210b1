//! Onion Input Viewer
//!
//! Opens a window, polls input once per frame and logs what each snapshot contains.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p onion-input-viewer -- [OPTIONS]
//! ```
//!
//! ## Controls
//!
//! - `Space`: capture the mouse (relative motion)
//! - `Escape`: release the mouse
//! - `W`: held key with controlled repeat
//! - `E`: double press detection
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;
mod runner;

use crate::runner::{run, ViewerConfig};

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    run(ViewerConfig::from_args())
}

fn print_help() {
    eprintln!(
        "Onion Input Viewer

USAGE:
    cargo run -p onion-input-viewer -- [OPTIONS]

OPTIONS:
    --width <N>             Window width (default: 1280)
    --height <N>            Window height (default: 720)
    --fps <N>               Target frames per second (default: 60)
    --capture               Start with the mouse captured
    -h, --help              Print this help message

CONTROLS:
    Space                   Capture the mouse
    Escape                  Release the mouse
    W                       Held key with controlled repeat
    E                       Double press detection

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
