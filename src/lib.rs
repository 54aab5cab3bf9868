//! Grid-based first-person raycaster.
//!
//! * [`world`] – tile map and player pose.
//! * [`engine`] – two-phase ray search, fisheye-corrected column projection.
//! * [`sim`] – input intents, fixed-rate tics and the frame driver.
//! * [`renderer`] – software back-end turning slices into pixels.
//! * [`level`] – plain-text layouts and the built-in 8×8 level.

pub mod engine;
pub mod level;
pub mod renderer;
pub mod sim;
pub mod world;
