//! Output metadata types

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

/// Descriptive tags attached to the output image. Computed once per
/// conversion and written to the sink exactly once, before any row data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterMetadata {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Human-readable description, derived from the input file name.
    pub description: String,
    /// Creation timestamp in the TIFF `YYYY:MM:DD HH:MM:SS` form, UTC.
    pub date_time: String,
    /// Optional Artist tag.
    pub artist: Option<String>,
}

impl RasterMetadata {
    /// Metadata for one conversion of `input` into a `width x height`
    /// image, stamped with the current UTC time.
    pub fn for_input(input: &Path, width: u32, height: u32, artist: Option<String>) -> Self {
        let base = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        Self {
            width,
            height,
            description: format!("TIFF of {base}"),
            date_time: Utc::now().format("%Y:%m:%d %H:%M:%S").to_string(),
            artist,
        }
    }

    /// Checks the preconditions for writing tags. Nothing may be written
    /// to a sink for metadata that fails here.
    pub fn verify(&self) -> Result<(), TagError> {
        if self.width == 0 {
            return Err(TagError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(TagError::ZeroHeight);
        }
        if self.description.is_empty() {
            return Err(TagError::EmptyDescription);
        }
        if self.date_time.is_empty() {
            return Err(TagError::EmptyDateTime);
        }
        Ok(())
    }
}

/// Output metadata rejected before anything was written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    #[error("the output width is not set")]
    ZeroWidth,

    #[error("the output height is not set")]
    ZeroHeight,

    #[error("the image description is not set")]
    EmptyDescription,

    #[error("the creation timestamp is not set")]
    EmptyDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_uses_the_input_base_name() {
        let meta = RasterMetadata::for_input(Path::new("/data/shots/img_0042.cr2"), 10, 10, None);
        assert_eq!(meta.description, "TIFF of img_0042.cr2");
    }

    #[test]
    fn test_timestamp_has_the_tiff_datetime_shape() {
        let meta = RasterMetadata::for_input(Path::new("a.arw"), 1, 1, None);
        let bytes = meta.date_time.as_bytes();
        assert_eq!(bytes.len(), 19);
        for (i, &b) in bytes.iter().enumerate() {
            match i {
                4 | 7 => assert_eq!(b, b':'),
                10 => assert_eq!(b, b' '),
                13 | 16 => assert_eq!(b, b':'),
                _ => assert!(b.is_ascii_digit()),
            }
        }
    }

    #[test]
    fn test_verify_rejects_incomplete_metadata() {
        let good = RasterMetadata::for_input(Path::new("a.arw"), 4, 3, None);
        assert_eq!(good.verify(), Ok(()));

        let mut meta = good.clone();
        meta.width = 0;
        assert_eq!(meta.verify(), Err(TagError::ZeroWidth));

        let mut meta = good.clone();
        meta.height = 0;
        assert_eq!(meta.verify(), Err(TagError::ZeroHeight));

        let mut meta = good.clone();
        meta.description.clear();
        assert_eq!(meta.verify(), Err(TagError::EmptyDescription));

        let mut meta = good;
        meta.date_time.clear();
        assert_eq!(meta.verify(), Err(TagError::EmptyDateTime));
    }
}
