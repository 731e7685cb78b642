//! Raster <-> matrix buffer conversion.
//!
//! Pure, stateless transforms between the two pixel models in `rb-core`:
//! [`to_matrix`] and [`from_matrix`] dispatch over the six storage types and
//! 1/3-channel layouts, [`unpack_bits`] expands 1-bit packed binary masks to
//! one byte per pixel, and [`is_binary_layout`] classifies layouts.
//!
//! Conversions allocate fresh destination buffers and never mutate their
//! inputs; ownership of the result passes to the caller.

mod from_matrix;
mod to_matrix;
mod unpack;

pub use from_matrix::from_matrix;
pub use to_matrix::to_matrix;
pub use unpack::{is_binary_layout, unpack_bits};
