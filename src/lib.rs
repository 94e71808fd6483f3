//! `pullcord` - A spring-physics pull cord that switches the colour theme
//!
//! A handle hangs from a fixed anchor on a damped spring. Dragging it far
//! enough down and letting go flips the page between the dark and white
//! themes, persists the choice, and swaps themed artwork. A seasonal snow
//! field can settle on the hero title during the winter months.
//!
//! The toggle core in [`toggle`] is platform-agnostic: hosts implement
//! [`toggle::CordSurface`] for their widget tree and drive
//! [`toggle::ToggleController::frame`] once per display frame.

pub mod config;
pub mod error;
pub mod snow;
pub mod storage;
pub mod theme;
pub mod toggle;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{PullcordError, Result};
