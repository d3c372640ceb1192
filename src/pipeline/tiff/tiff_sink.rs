use std::fs::File;
use std::io::{Cursor, Write};
use std::mem;
use std::path::Path;

use tiff::encoder::colortype::Gray16;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Tag;
use tracing::{debug, warn};

use crate::pipeline::common::error::{ConvertError, Result};
use crate::pipeline::tiff::sink::RasterSink;
use crate::pipeline::tiff::types::RasterMetadata;

/// Raster sink backed by the tiff crate.
///
/// Emits exactly one image per sink: 16-bit unsigned grayscale samples,
/// uncompressed, contiguous, top-left orientation, a single strip spanning
/// the full image height. Scanlines accumulate into that strip and the
/// file structure is finalized on `close`, matching the buffering libtiff
/// applies when `RowsPerStrip` equals the image height.
///
/// A sink closed before every scanline arrived writes no image structure
/// at all; the truncated artifact never claims success through its tags.
pub struct TiffSink {
    state: SinkState,
}

enum SinkState {
    Open(File),
    Tagged {
        file: File,
        meta: RasterMetadata,
        strip: Vec<u16>,
        rows_written: u32,
    },
    Closed,
}

impl TiffSink {
    /// Opens the destination for writing. Fails up front if the path is
    /// not writable, before any pixel work is spent.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| ConvertError::OutputCreate {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "output file created");
        Ok(Self {
            state: SinkState::Open(file),
        })
    }
}

impl RasterSink for TiffSink {
    fn set_tags(&mut self, meta: &RasterMetadata) -> Result<()> {
        meta.verify()?;
        match mem::replace(&mut self.state, SinkState::Closed) {
            SinkState::Open(file) => {
                let pixels = meta.width as usize * meta.height as usize;
                self.state = SinkState::Tagged {
                    file,
                    meta: meta.clone(),
                    strip: Vec::with_capacity(pixels),
                    rows_written: 0,
                };
                Ok(())
            }
            SinkState::Tagged { .. } => {
                Err(ConvertError::Encode("tags were already set".to_string()))
            }
            SinkState::Closed => Err(ConvertError::Encode(
                "the sink is already closed".to_string(),
            )),
        }
    }

    fn write_row(&mut self, row_index: u32, samples: &[u16]) -> Result<()> {
        match &mut self.state {
            SinkState::Tagged {
                meta,
                strip,
                rows_written,
                ..
            } => {
                if row_index != *rows_written {
                    return Err(ConvertError::Encode(format!(
                        "scanline {row_index} written out of order, expected {rows_written}"
                    )));
                }
                if *rows_written >= meta.height {
                    return Err(ConvertError::Encode(format!(
                        "scanline {row_index} is past the image height {}",
                        meta.height
                    )));
                }
                if samples.len() != meta.width as usize {
                    return Err(ConvertError::Encode(format!(
                        "scanline {row_index} holds {} samples, the image is {} wide",
                        samples.len(),
                        meta.width
                    )));
                }
                strip.extend_from_slice(samples);
                *rows_written += 1;
                Ok(())
            }
            SinkState::Open(_) => Err(ConvertError::Encode(
                "tags must be set before scanlines".to_string(),
            )),
            SinkState::Closed => Err(ConvertError::Encode(
                "the sink is already closed".to_string(),
            )),
        }
    }

    fn close(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, SinkState::Closed) {
            SinkState::Tagged {
                file,
                meta,
                strip,
                rows_written,
            } => {
                if rows_written != meta.height {
                    warn!(
                        rows_written,
                        expected = meta.height,
                        "sink closed before all scanlines arrived, discarding the image"
                    );
                    return Ok(());
                }
                encode_image(file, &meta, &strip)
            }
            // Never tagged, or already closed: nothing to finalize.
            SinkState::Open(_) | SinkState::Closed => Ok(()),
        }
    }
}

fn encode_image(mut file: File, meta: &RasterMetadata, strip: &[u16]) -> Result<()> {
    debug!(
        width = meta.width,
        height = meta.height,
        "encoding TIFF image"
    );

    let mut buffer = Vec::new();

    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
        .map_err(|e| ConvertError::Encode(e.to_string()))?
        .with_compression(Compression::Uncompressed);

    let mut image = encoder
        .new_image::<Gray16>(meta.width, meta.height)
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    image
        .rows_per_strip(meta.height)
        .map_err(|e| ConvertError::Encode(e.to_string()))?;

    let tags = image.encoder();
    tags.write_tag(Tag::ImageDescription, meta.description.as_str())
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    tags.write_tag(Tag::DateTime, meta.date_time.as_str())
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    // 1 = top-left row/column order
    tags.write_tag(Tag::Orientation, 1u16)
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    if let Some(artist) = &meta.artist {
        tags.write_tag(Tag::Artist, artist.as_str())
            .map_err(|e| ConvertError::Encode(e.to_string()))?;
    }

    image
        .write_data(strip)
        .map_err(|e| ConvertError::Encode(e.to_string()))?;

    file.write_all(&buffer)?;

    debug!("TIFF encoding complete");
    Ok(())
}
