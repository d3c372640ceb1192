use crate::pipeline::common::error::Result;

/// Read-only view of a decoded sensor frame.
///
/// Coordinates are always full-frame sensor coordinates; callers that work
/// on a sub-region still address samples by the unrestricted geometry.
pub trait RawSource {
    /// Full sensor width in photosites.
    fn width(&self) -> usize;

    /// Full sensor height in photosites.
    fn height(&self) -> usize;

    /// The sample of the given color channel at the given photosite.
    ///
    /// Addressing a photosite outside the frame is a programming error and
    /// panics; validated crop geometry never reaches one.
    fn sample(&self, row: usize, col: usize, channel: usize) -> u16;

    /// Which color-filter channel (0 to 3 in a Bayer layout) the photosite
    /// at this position carries. Deterministic for a given frame.
    fn channel(&self, row: usize, col: usize) -> usize;

    /// Apply sensor-specific corrections such as black-level subtraction.
    /// Must run before any sample is read.
    fn normalize(&mut self);
}

/// Seam between the pipeline and a concrete raw decoding backend.
pub trait RawDecoder {
    type Source: RawSource;

    fn decode(&self, data: &[u8]) -> Result<Self::Source>;
}
