//! Crop box validation
//!
//! Turns a user-supplied crop request into a rectangle that is proven to
//! fit inside the sensor frame before any pixel is touched.

mod region;

pub use region::{CropRegion, CropSpec, GeometryError};
