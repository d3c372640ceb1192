//! Decoded sensor frame

use std::fmt;

use rawloader::CFA;

use crate::pipeline::raw::source::RawSource;

/// A decoded single-channel sensor mosaic.
///
/// Samples are stored flat in row-major order with the full sensor width as
/// stride, one value per photosite. The CFA layout tells which color band
/// each photosite captured.
pub struct SensorFrame {
    width: usize,
    height: usize,
    samples: Vec<u16>,
    cfa: CFA,
    /// Per-channel black levels still to be subtracted; zeroed once
    /// `normalize` has applied them.
    blacklevels: [u16; 4],
    /// Camera identification, for diagnostics only.
    pub make: String,
    pub model: String,
}

impl SensorFrame {
    /// Wraps decoded sensor data. The sample buffer must cover the full
    /// `width x height` grid.
    pub fn new(
        width: usize,
        height: usize,
        samples: Vec<u16>,
        cfa: CFA,
        blacklevels: [u16; 4],
        make: String,
        model: String,
    ) -> Self {
        assert!(
            samples.len() >= width * height,
            "sample buffer holds {} values, the {}x{} frame needs {}",
            samples.len(),
            width,
            height,
            width * height
        );
        Self {
            width,
            height,
            samples,
            cfa,
            blacklevels,
            make,
            model,
        }
    }

    /// Name of the CFA layout, e.g. "RGGB".
    pub fn cfa_name(&self) -> &str {
        &self.cfa.name
    }
}

impl RawSource for SensorFrame {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn sample(&self, row: usize, col: usize, channel: usize) -> u16 {
        debug_assert!(row < self.height && col < self.width);
        // The mosaic stores one sample per photosite, so the channel picks
        // nothing here; it must still agree with the CFA layout.
        debug_assert_eq!(channel, self.cfa.color_at(row, col));
        self.samples[row * self.width + col]
    }

    fn channel(&self, row: usize, col: usize) -> usize {
        self.cfa.color_at(row, col)
    }

    fn normalize(&mut self) {
        if self.blacklevels.iter().all(|&level| level == 0) {
            return;
        }
        for row in 0..self.height {
            for col in 0..self.width {
                let level = self.blacklevels[self.cfa.color_at(row, col)];
                let sample = &mut self.samples[row * self.width + col];
                *sample = sample.saturating_sub(level);
            }
        }
        self.blacklevels = [0; 4];
    }
}

impl fmt::Debug for SensorFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cfa", &self.cfa.name)
            .field("make", &self.make)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: usize, height: usize, blacklevels: [u16; 4]) -> SensorFrame {
        let samples = (0..width * height).map(|i| i as u16 + 100).collect();
        SensorFrame::new(
            width,
            height,
            samples,
            CFA::new("RGGB"),
            blacklevels,
            "Testmake".to_string(),
            "Testmodel".to_string(),
        )
    }

    #[test]
    fn test_channel_follows_the_cfa_pattern() {
        let frame = frame(4, 4, [0; 4]);
        assert_eq!(frame.channel(0, 0), 0);
        assert_eq!(frame.channel(0, 1), 1);
        assert_eq!(frame.channel(1, 0), 1);
        assert_eq!(frame.channel(1, 1), 2);
        // the pattern repeats
        assert_eq!(frame.channel(2, 2), 0);
    }

    #[test]
    fn test_sample_uses_the_full_frame_stride() {
        let frame = frame(4, 3, [0; 4]);
        let channel = frame.channel(2, 3);
        assert_eq!(frame.sample(2, 3, channel), 100 + 2 * 4 + 3);
    }

    #[test]
    fn test_normalize_subtracts_per_channel_black_levels() {
        let mut frame = frame(2, 2, [10, 20, 30, 40]);
        frame.normalize();
        // RGGB: (0,0)=R, (0,1)=G1, (1,0)=G1, (1,1)=B
        // rawloader maps R=0, G=1, B=2, so G sites share blacklevel 20.
        assert_eq!(frame.sample(0, 0, frame.channel(0, 0)), 100 - 10);
        assert_eq!(frame.sample(0, 1, frame.channel(0, 1)), 101 - 20);
        assert_eq!(frame.sample(1, 0, frame.channel(1, 0)), 102 - 20);
        assert_eq!(frame.sample(1, 1, frame.channel(1, 1)), 103 - 30);
    }

    #[test]
    fn test_normalize_saturates_at_zero() {
        let mut frame = SensorFrame::new(
            1,
            1,
            vec![5],
            CFA::new("RGGB"),
            [10, 0, 0, 0],
            String::new(),
            String::new(),
        );
        frame.normalize();
        assert_eq!(frame.sample(0, 0, 0), 0);
    }

    #[test]
    fn test_normalize_applies_only_once() {
        let mut frame = frame(2, 2, [10, 10, 10, 10]);
        frame.normalize();
        frame.normalize();
        assert_eq!(frame.sample(0, 0, frame.channel(0, 0)), 90);
    }

    #[test]
    #[should_panic]
    fn test_short_sample_buffer_is_rejected() {
        SensorFrame::new(
            4,
            4,
            vec![0; 8],
            CFA::new("RGGB"),
            [0; 4],
            String::new(),
            String::new(),
        );
    }
}
