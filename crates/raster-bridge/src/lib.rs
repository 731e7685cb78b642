//! Umbrella crate for the `raster-bridge` workspace.
//!
//! Re-exports the buffer models, the raster <-> matrix conversion engine,
//! and the contour-forest topology engine.

pub use rb_contour::*;
pub use rb_convert::*;
pub use rb_core::*;
