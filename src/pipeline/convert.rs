//! Conversion orchestration
//!
//! Wires decode, geometry validation, extraction and TIFF emission
//! together for one file.

mod raw_to_tiff;
#[cfg(test)]
mod tests;

pub use raw_to_tiff::{ConvertConfig, ConvertConfigBuilder, ConvertPipeline};
