use tracing::debug;

use crate::pipeline::common::error::Result;
use crate::pipeline::extract::RowExtractor;
use crate::pipeline::raw::RawSource;
use crate::pipeline::tiff::sink::RasterSink;
use crate::pipeline::tiff::types::RasterMetadata;

/// Drives a raster sink through one complete image.
///
/// Metadata is verified and written before the first row, rows go out in
/// increasing 0-based order, and the sink is closed on every exit path. A
/// failed row write aborts the remaining rows.
pub struct RasterEmitter<K: RasterSink> {
    sink: K,
}

impl<K: RasterSink> RasterEmitter<K> {
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    /// Writes the whole image, consuming the emitter.
    pub fn emit<S: RawSource>(
        mut self,
        meta: &RasterMetadata,
        rows: &mut RowExtractor<'_, S>,
    ) -> Result<()> {
        let result = self.emit_rows(meta, rows);
        let closed = self.sink.close();
        match result {
            // A close failure on an otherwise clean run is a real failure;
            // after an earlier error it must not mask the cause.
            Ok(()) => closed,
            Err(e) => Err(e),
        }
    }

    fn emit_rows<S: RawSource>(
        &mut self,
        meta: &RasterMetadata,
        rows: &mut RowExtractor<'_, S>,
    ) -> Result<()> {
        meta.verify()?;
        self.sink.set_tags(meta)?;

        let mut row_index = 0u32;
        while let Some(samples) = rows.next_row() {
            self.sink.write_row(row_index, samples)?;
            row_index += 1;
        }
        debug!(rows = row_index, "all scanlines written");
        Ok(())
    }
}
