//! rawcrop converts raw camera sensor captures (ARW, CR2, NEF, DNG, ...)
//! into uncompressed grayscale 16-bit TIFF images, optionally restricted to
//! a rectangular crop box of the sensor frame.

pub mod logger;
pub mod pipeline;
