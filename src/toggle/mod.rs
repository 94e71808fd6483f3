//! Pull-cord theme toggle
//!
//! A lightbulb hangs from a cord; pulling the cord's handle down far enough
//! and letting go flips the site theme. The handle is a point mass on a
//! damped spring, so it springs back after every pull.
//!
//! # Architecture
//!
//! - `physics`: anchor, handle state, spring parameters and the integrator
//! - `input`: mouse/touch normalization and client-to-local mapping
//! - `render`: straight or slack cord geometry as SVG path data
//! - `controller`: the `Idle`/`Dragging` state machine tying it together
//!
//! # Example Usage
//!
//! ```
//! use pullcord::storage::{MemoryStore, Preferences};
//! use pullcord::theme::{Theme, ThemeTarget, ThemedImage};
//! use pullcord::toggle::{CordPath, CordSurface, Point, PointerEvent, PointerPhase, Rect,
//!     ToggleController, ToggleSettings};
//!
//! #[derive(Default)]
//! struct Page {
//!     images: Vec<ThemedImage>,
//! }
//!
//! impl ThemeTarget for Page {
//!     fn set_theme_attribute(&mut self, _theme: Theme) {}
//!     fn themed_images(&mut self) -> &mut [ThemedImage] {
//!         &mut self.images
//!     }
//! }
//!
//! impl CordSurface for Page {
//!     fn container_rect(&self) -> Rect {
//!         Rect::default()
//!     }
//!     fn place_handle(&mut self, _left: f64, _top: f64) {}
//!     fn draw_cord(&mut self, _path: &CordPath) {}
//! }
//!
//! let mut toggle = ToggleController::mount(
//!     Some(Page::default()),
//!     ToggleSettings::default(),
//!     Preferences::new(MemoryStore::default()),
//! )
//! .expect("surface present");
//!
//! toggle.handle_pointer(PointerEvent::mouse(PointerPhase::Down, Point::new(50.0, 290.0)));
//! toggle.handle_pointer(PointerEvent::mouse(PointerPhase::Move, Point::new(50.0, 360.0)));
//! let flipped = toggle.handle_pointer(PointerEvent::mouse(PointerPhase::Up, Point::new(50.0, 360.0)));
//! assert_eq!(flipped, Some(Theme::White));
//!
//! // Keep calling frame() from the host's frame callback
//! toggle.frame();
//! ```

pub mod controller;
pub mod input;
pub mod physics;
pub mod render;

pub use controller::{
    CordSurface, DragMode, Haptics, NoHaptics, TOGGLE_PULSE, ToggleController, ToggleSettings,
};
pub use input::{PointerEvent, PointerKind, PointerMapping, PointerPhase, Rect};
pub use physics::{AnchorPoint, HandleState, Point, SpringParameters};
pub use render::{CordPath, CordStyle};
