//! Foundational types for the raster-bridge workspace.
//!
//! ## Buffer Models
//! Two in-memory pixel representations meet here. The raster model
//! ([`Raster`]) is row-major sample storage with a per-band layout:
//! interleaved lanes, fully separated u8 planes, or 1-bit packed words for
//! binary masks. The matrix model ([`Matrix`]) is the processing engine's
//! dense channel-interleaved array with a runtime element-type tag.
//!
//! ## Storage Types
//! Both models support the same six numeric element types, modeled as the
//! closed enums [`Storage`] and [`Depth`]. Converters match exhaustively,
//! so adding a type surfaces as compile errors rather than runtime
//! `UnsupportedStorageType` failures.
//!
//! ## Channel Order
//! Three-channel matrices are B,G,R (the engine's native order) unless a
//! conversion is explicitly asked for non-native order. Rasters name their
//! lane order through `band_offsets`: `[0,1,2]` means lanes run R,G,B,
//! `[2,1,0]` means B,G,R.

mod error;
mod geom;
mod matrix;
mod raster;

pub use error::Error;
pub use geom::{Point2f, Rect};
pub use matrix::{Depth, Matrix, MatrixData};
pub use raster::{Raster, RasterData, SampleLayout, Storage};
