use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::geometry::GeometryError;
use crate::pipeline::tiff::TagError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read input file {path}: {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create output file {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode raw image: {0}")]
    Decode(String),

    #[error("unsupported raw format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid crop geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("incomplete output metadata: {0}")]
    Tag(#[from] TagError),

    #[error("failed to encode TIFF image: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Process exit code for this failure class. Success is 0 and clap
    /// reports usage errors as 2, so conversion failures start at 3.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::Geometry(_) => 3,
            ConvertError::Decode(_) | ConvertError::UnsupportedFormat(_) => 4,
            ConvertError::Tag(_) => 5,
            ConvertError::InputRead { .. }
            | ConvertError::OutputCreate { .. }
            | ConvertError::Encode(_)
            | ConvertError::Io(_) => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
