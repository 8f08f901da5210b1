//! Test harness for Onion input capture.
//!
//! Provides a headless, scriptable platform so polling, debouncing and capture behavior can
//! be driven frame by frame with a manual clock.

pub mod headless;

pub use headless::HeadlessPlatform;

#[cfg(test)]
mod tests;
