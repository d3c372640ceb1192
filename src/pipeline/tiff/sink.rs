use crate::pipeline::common::error::Result;
use crate::pipeline::tiff::types::RasterMetadata;

/// Destination for one grayscale 16-bit raster image.
///
/// The call order is fixed: `set_tags` exactly once, then `write_row` for
/// every row in increasing 0-based order, then `close`. `close` is
/// idempotent and must be reached on every exit path, including failures
/// partway through the rows.
pub trait RasterSink {
    fn set_tags(&mut self, meta: &RasterMetadata) -> Result<()>;

    fn write_row(&mut self, row_index: u32, samples: &[u16]) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}
