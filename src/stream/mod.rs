//! Playback outside the terminal
//!
//! - Overlay: opens the overlay page in the system browser or a configured opener

pub mod overlay;

pub use overlay::{LaunchError, OverlayLauncher};
