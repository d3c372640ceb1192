//! Raw decoding backed by the rawloader library.
//!
//! rawloader decodes the proprietary raw formats (Sony ARW, Canon CR2,
//! Nikon NEF, Adobe DNG, ...) into a flat single-channel sensor mosaic
//! together with the CFA layout and the sensor's black and white levels.

use std::io::Cursor;

use rawloader::RawImageData;
use tracing::{debug, info};

use crate::pipeline::common::error::{ConvertError, Result};
use crate::pipeline::raw::source::RawDecoder;
use crate::pipeline::raw::types::SensorFrame;

/// Decoder that turns raw file bytes into a [`SensorFrame`].
///
/// Any format rawloader understands is accepted, as long as the decoded
/// result is a plain sensor mosaic (one component per pixel). Raw files
/// that decode to an already interpolated image are refused; this
/// converter does not demosaic.
pub struct RawloaderDecoder;

impl RawDecoder for RawloaderDecoder {
    type Source = SensorFrame;

    fn decode(&self, data: &[u8]) -> Result<SensorFrame> {
        debug!("decoding raw image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConvertError::Decode(e.to_string()))?;

        if decoded.cpp != 1 {
            return Err(ConvertError::UnsupportedFormat(format!(
                "expected a single-channel sensor mosaic, got {} components per pixel",
                decoded.cpp
            )));
        }

        // The frame information the user sees on stderr before conversion
        // starts.
        info!(
            width = decoded.width,
            height = decoded.height,
            make = %decoded.clean_make,
            model = %decoded.clean_model,
            cfa = %decoded.cfa.name,
            "decoded raw frame"
        );
        debug!(
            blacklevels = ?decoded.blacklevels,
            whitelevels = ?decoded.whitelevels,
            crops = ?decoded.crops,
            "sensor levels"
        );

        let samples: Vec<u16> = match decoded.data {
            RawImageData::Integer(values) => values,
            // Float raws carry normalized 0.0..1.0 values; scale them into
            // the u16 range.
            RawImageData::Float(values) => values
                .iter()
                .map(|&v| (v * u16::MAX as f32) as u16)
                .collect(),
        };

        if samples.len() < decoded.width * decoded.height {
            return Err(ConvertError::Decode(format!(
                "decoded {} samples, the {}x{} frame needs {}",
                samples.len(),
                decoded.width,
                decoded.height,
                decoded.width * decoded.height
            )));
        }

        Ok(SensorFrame::new(
            decoded.width,
            decoded.height,
            samples,
            decoded.cfa,
            decoded.blacklevels,
            decoded.clean_make,
            decoded.clean_model,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_input_is_a_decode_error() {
        let result = RawloaderDecoder.decode(b"not a raw file at all");
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }
}
