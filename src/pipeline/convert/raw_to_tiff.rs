use std::fs;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::pipeline::common::error::{ConvertError, Result};
use crate::pipeline::extract::RowExtractor;
use crate::pipeline::geometry::{CropRegion, CropSpec};
use crate::pipeline::raw::{RawDecoder, RawSource, RawloaderDecoder};
use crate::pipeline::tiff::{RasterEmitter, RasterMetadata, TiffSink};

/// Configuration for raw-to-TIFF conversions.
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Sub-region of the sensor frame to extract; `None` takes the full
    /// frame.
    pub crop: Option<CropSpec>,
    /// Value for the TIFF Artist tag, omitted when `None`.
    pub artist: Option<String>,
}

impl ConvertConfig {
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder::default()
    }
}

/// Builder for [`ConvertConfig`].
#[derive(Default)]
pub struct ConvertConfigBuilder {
    crop: Option<CropSpec>,
    artist: Option<String>,
}

impl ConvertConfigBuilder {
    pub fn crop(mut self, crop: CropSpec) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn build(self) -> ConvertConfig {
        ConvertConfig {
            crop: self.crop,
            artist: self.artist,
        }
    }
}

/// Converts raw camera files into grayscale 16-bit TIFF images.
pub struct ConvertPipeline<D: RawDecoder> {
    decoder: D,
    config: ConvertConfig,
}

impl ConvertPipeline<RawloaderDecoder> {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            decoder: RawloaderDecoder,
            config,
        }
    }
}

impl<D: RawDecoder> ConvertPipeline<D> {
    pub fn with_decoder(decoder: D, config: ConvertConfig) -> Self {
        Self { decoder, config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Runs one conversion from `input` to `output`.
    ///
    /// Failures abort the whole run; a partially written output file is
    /// removed rather than left behind with tags that claim success.
    #[instrument(skip(self, input, output))]
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<()> {
        info!(
            input = %input.display(),
            output = %output.display(),
            "converting file"
        );

        let input_data = fs::read(input).map_err(|e| ConvertError::InputRead {
            path: input.to_path_buf(),
            source: e,
        })?;

        let mut frame = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.decoder.decode(&input_data)?
        };

        // The crop box is checked against the true sensor dimensions
        // before any further work on the frame.
        let region = {
            let _span = tracing::info_span!("validate_geometry").entered();
            CropRegion::validate(
                self.config.crop.as_ref(),
                frame.width() as u32,
                frame.height() as u32,
            )?
        };
        info!(
            col_start = region.col_start,
            col_end = region.col_end,
            row_start = region.row_start,
            row_end = region.row_end,
            "image area"
        );

        // Black-level correction runs before any sample is extracted.
        frame.normalize();

        let meta = RasterMetadata::for_input(
            input,
            region.width(),
            region.height(),
            self.config.artist.clone(),
        );

        let sink = TiffSink::create(output)?;
        let result = {
            let _span = tracing::info_span!("emit_tiff").entered();
            let mut rows = RowExtractor::new(&frame, region);
            RasterEmitter::new(sink).emit(&meta, &mut rows)
        };

        if let Err(e) = result {
            if let Err(remove_err) = fs::remove_file(output) {
                warn!(
                    path = %output.display(),
                    error = %remove_err,
                    "could not remove the failed output file"
                );
            }
            return Err(e);
        }

        info!(
            width = region.width(),
            height = region.height(),
            "conversion complete"
        );
        Ok(())
    }
}
