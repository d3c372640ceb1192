//! Pixel extraction
//!
//! Streams the samples of a validated crop region out of a sensor frame,
//! one output row at a time.

mod rows;

pub use rows::RowExtractor;
