//! Raw-to-TIFF conversion pipeline
//!
//! The pipeline is split along the stages of one conversion run: `raw`
//! decodes the sensor frame, `geometry` validates the requested crop box
//! against it, `extract` streams the selected samples out row by row, and
//! `tiff` writes them to the output file. `convert` wires the stages
//! together for a whole file.

pub mod common;
pub mod convert;
pub mod extract;
pub mod geometry;
pub mod raw;
pub mod tiff;

pub use common::{
    ConvertError,
    Result,
};

pub use geometry::{
    CropRegion,
    CropSpec,
    GeometryError,
};

pub use raw::{
    RawDecoder,
    RawSource,
    RawloaderDecoder,
    SensorFrame,
};

pub use extract::{
    RowExtractor,
};

pub use tiff::{
    RasterEmitter,
    RasterMetadata,
    RasterSink,
    TagError,
    TiffSink,
};

pub use convert::{
    ConvertConfig,
    ConvertConfigBuilder,
    ConvertPipeline,
};
