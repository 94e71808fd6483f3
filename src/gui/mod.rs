//! GUI module
//!
//! Hosts the pull-cord toggle and the snow layer in a Slint window and drives
//! both from a frame timer on the UI thread.

pub mod gui_controller;
pub mod snow_layer;
pub mod surface;

pub use gui_controller::GuiController;
