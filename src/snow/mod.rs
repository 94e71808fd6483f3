//! Seasonal snow over the hero title
//!
//! In winter, snow falls across the hero area and gradually piles up on the
//! title lettering.
//!
//! # Architecture
//!
//! - `season`: December-February (JST) gate
//! - `mask`: which field pixels belong to the title
//! - `field`: particle simulation and RGBA rendering
//!
//! The host owns the frame loop: call [`SnowField::step`] and
//! [`SnowField::render_rgba`] once per frame, and [`SnowField::resize`]
//! after the hero area settles at a new size.

pub mod field;
pub mod mask;
pub mod season;

pub use field::{SnowField, SnowParticle, SnowSettings};
pub use mask::{ALPHA_THRESHOLD, MaskRect, TextMask};
pub use season::is_snow_season;
