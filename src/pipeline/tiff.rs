//! TIFF emission
//!
//! The output side of the pipeline: descriptive metadata, the raster sink
//! contract, the tiff-crate backed sink, and the emitter that drives a
//! sink through one complete image.

mod emitter;
mod sink;
mod tiff_sink;
pub mod types;

pub use emitter::RasterEmitter;
pub use sink::RasterSink;
pub use tiff_sink::TiffSink;
pub use types::{RasterMetadata, TagError};
