use thiserror::Error;
use tracing::debug;

/// A crop box as requested by the user: an origin inside the sensor frame
/// plus the number of columns and rows to take from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    pub col_start: u32,
    pub row_start: u32,
    pub num_cols: u32,
    pub num_rows: u32,
}

/// A crop request that cannot be satisfied by the sensor frame it was made
/// against. Each variant names the first rule the request violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("the starting row {row_start} is beyond the sensor height {sensor_height}")]
    RowStartPastHeight { row_start: u32, sensor_height: u32 },

    #[error("the starting column {col_start} is beyond the sensor width {sensor_width}")]
    ColStartPastWidth { col_start: u32, sensor_width: u32 },

    #[error("the requested {num_rows} rows exceed the sensor height {sensor_height}")]
    RowCountPastHeight { num_rows: u32, sensor_height: u32 },

    #[error("the requested {num_cols} columns exceed the sensor width {sensor_width}")]
    ColCountPastWidth { num_cols: u32, sensor_width: u32 },

    #[error(
        "the starting row {row_start} plus {num_rows} rows overruns the sensor height {sensor_height}"
    )]
    RowSpanPastHeight {
        row_start: u32,
        num_rows: u32,
        sensor_height: u32,
    },

    #[error(
        "the starting column {col_start} plus {num_cols} columns overruns the sensor width {sensor_width}"
    )]
    ColSpanPastWidth {
        col_start: u32,
        num_cols: u32,
        sensor_width: u32,
    },

    #[error("the requested crop box is empty ({num_cols}x{num_rows})")]
    EmptyCrop { num_cols: u32, num_rows: u32 },

    #[error("the sensor frame is empty ({sensor_width}x{sensor_height})")]
    EmptyFrame {
        sensor_width: u32,
        sensor_height: u32,
    },
}

/// A rectangle validated against the sensor dimensions. `col_end` and
/// `row_end` are exclusive; a region is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub col_start: u32,
    pub row_start: u32,
    pub col_end: u32,
    pub row_end: u32,
}

impl CropRegion {
    /// The region covering the whole sensor frame.
    pub fn full_frame(sensor_width: u32, sensor_height: u32) -> Self {
        Self {
            col_start: 0,
            row_start: 0,
            col_end: sensor_width,
            row_end: sensor_height,
        }
    }

    /// Validates a crop request against the true sensor dimensions.
    ///
    /// With no request the full frame is taken. A request has to satisfy,
    /// in order: the origin lies within the frame, neither extent exceeds
    /// the frame, and origin plus extent stays within the frame. The first
    /// violated rule is reported. An empty crop box is rejected as well,
    /// since it would produce an image with no pixels.
    pub fn validate(
        request: Option<&CropSpec>,
        sensor_width: u32,
        sensor_height: u32,
    ) -> Result<Self, GeometryError> {
        let Some(spec) = request else {
            if sensor_width == 0 || sensor_height == 0 {
                return Err(GeometryError::EmptyFrame {
                    sensor_width,
                    sensor_height,
                });
            }
            return Ok(Self::full_frame(sensor_width, sensor_height));
        };

        if spec.row_start > sensor_height {
            return Err(GeometryError::RowStartPastHeight {
                row_start: spec.row_start,
                sensor_height,
            });
        }
        if spec.col_start > sensor_width {
            return Err(GeometryError::ColStartPastWidth {
                col_start: spec.col_start,
                sensor_width,
            });
        }
        if spec.num_rows > sensor_height {
            return Err(GeometryError::RowCountPastHeight {
                num_rows: spec.num_rows,
                sensor_height,
            });
        }
        if spec.num_cols > sensor_width {
            return Err(GeometryError::ColCountPastWidth {
                num_cols: spec.num_cols,
                sensor_width,
            });
        }
        // Sums are taken in u64 so a request near u32::MAX cannot wrap
        // itself back into range.
        if u64::from(spec.row_start) + u64::from(spec.num_rows) > u64::from(sensor_height) {
            return Err(GeometryError::RowSpanPastHeight {
                row_start: spec.row_start,
                num_rows: spec.num_rows,
                sensor_height,
            });
        }
        if u64::from(spec.col_start) + u64::from(spec.num_cols) > u64::from(sensor_width) {
            return Err(GeometryError::ColSpanPastWidth {
                col_start: spec.col_start,
                num_cols: spec.num_cols,
                sensor_width,
            });
        }
        if spec.num_cols == 0 || spec.num_rows == 0 {
            return Err(GeometryError::EmptyCrop {
                num_cols: spec.num_cols,
                num_rows: spec.num_rows,
            });
        }

        debug!(
            col_start = spec.col_start,
            row_start = spec.row_start,
            num_cols = spec.num_cols,
            num_rows = spec.num_rows,
            "crop box accepted"
        );

        Ok(Self {
            col_start: spec.col_start,
            row_start: spec.row_start,
            col_end: spec.col_start + spec.num_cols,
            row_end: spec.row_start + spec.num_rows,
        })
    }

    pub fn width(&self) -> u32 {
        self.col_end - self.col_start
    }

    pub fn height(&self) -> u32 {
        self.row_end - self.row_start
    }
}
