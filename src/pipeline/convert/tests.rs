use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use crate::pipeline::common::error::ConvertError;
use crate::pipeline::convert::{ConvertConfig, ConvertPipeline};
use crate::pipeline::geometry::{CropSpec, GeometryError};
use crate::pipeline::raw::{RawDecoder, RawSource};

/// Stand-in for the rawloader backend: ignores the input bytes and hands
/// out a synthetic sensor frame of the configured size.
struct MockDecoder {
    width: usize,
    height: usize,
    fail: bool,
}

struct MockFrame {
    width: usize,
    height: usize,
}

impl RawSource for MockFrame {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn sample(&self, row: usize, col: usize, _channel: usize) -> u16 {
        (row * 100 + col) as u16
    }

    fn channel(&self, row: usize, col: usize) -> usize {
        (row % 2) * 2 + col % 2
    }

    fn normalize(&mut self) {}
}

impl RawDecoder for MockDecoder {
    type Source = MockFrame;

    fn decode(&self, _data: &[u8]) -> crate::pipeline::common::error::Result<MockFrame> {
        if self.fail {
            return Err(ConvertError::Decode("mock decode failure".to_string()));
        }
        Ok(MockFrame {
            width: self.width,
            height: self.height,
        })
    }
}

struct Setup {
    _dir: tempfile::TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn setup() -> Setup {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shot.arw");
    fs::write(&input, b"mock raw bytes").unwrap();
    let output = dir.path().join("shot.tif");
    Setup {
        input,
        output,
        _dir: dir,
    }
}

fn decode_output(path: &std::path::Path) -> (u32, u32, Vec<u16>, String) {
    let data = fs::read(path).unwrap();
    let mut decoder = Decoder::new(Cursor::new(data)).unwrap();
    let (width, height) = decoder.dimensions().unwrap();
    let DecodingResult::U16(samples) = decoder.read_image().unwrap() else {
        panic!("expected 16-bit samples");
    };
    let description = decoder.get_tag_ascii_string(Tag::ImageDescription).unwrap();
    (width, height, samples, description)
}

#[test]
fn test_full_frame_conversion() {
    let setup = setup();
    let pipeline = ConvertPipeline::with_decoder(
        MockDecoder {
            width: 8,
            height: 6,
            fail: false,
        },
        ConvertConfig::default(),
    );

    pipeline.convert_file(&setup.input, &setup.output).unwrap();

    let (width, height, samples, description) = decode_output(&setup.output);
    assert_eq!((width, height), (8, 6));
    assert_eq!(samples.len(), 48);
    assert_eq!(samples[0], 0);
    // sensor row 3, column 5
    assert_eq!(samples[3 * 8 + 5], 305);
    assert_eq!(description, "TIFF of shot.arw");
}

#[test]
fn test_cropped_conversion_rebases_rows() {
    let setup = setup();
    let config = ConvertConfig::builder()
        .crop(CropSpec {
            col_start: 0,
            row_start: 2,
            num_cols: 5,
            num_rows: 3,
        })
        .build();
    let pipeline = ConvertPipeline::with_decoder(
        MockDecoder {
            width: 8,
            height: 6,
            fail: false,
        },
        config,
    );

    pipeline.convert_file(&setup.input, &setup.output).unwrap();

    let (width, height, samples, _) = decode_output(&setup.output);
    assert_eq!((width, height), (5, 3));
    // output row 0 is sensor row 2, columns [0, 5)
    assert_eq!(&samples[0..5], &[200, 201, 202, 203, 204]);
    // output row 2 is sensor row 4
    assert_eq!(&samples[10..15], &[400, 401, 402, 403, 404]);
}

#[test]
fn test_rejected_crop_leaves_no_output_file() {
    let setup = setup();
    // 4 + 3 = 7 > 6 violates the row span rule
    let config = ConvertConfig::builder()
        .crop(CropSpec {
            col_start: 0,
            row_start: 4,
            num_cols: 4,
            num_rows: 3,
        })
        .build();
    let pipeline = ConvertPipeline::with_decoder(
        MockDecoder {
            width: 8,
            height: 6,
            fail: false,
        },
        config,
    );

    let result = pipeline.convert_file(&setup.input, &setup.output);
    assert!(matches!(
        result,
        Err(ConvertError::Geometry(GeometryError::RowSpanPastHeight {
            row_start: 4,
            num_rows: 3,
            sensor_height: 6,
        }))
    ));
    assert!(!setup.output.exists());
}

#[test]
fn test_unwritable_destination_fails_before_any_write() {
    let setup = setup();
    let pipeline = ConvertPipeline::with_decoder(
        MockDecoder {
            width: 4,
            height: 4,
            fail: false,
        },
        ConvertConfig::default(),
    );

    let bad_output = setup.output.parent().unwrap().join("missing/dir/out.tif");
    let result = pipeline.convert_file(&setup.input, &bad_output);
    assert!(matches!(result, Err(ConvertError::OutputCreate { .. })));
    assert_eq!(result.unwrap_err().exit_code(), 6);
}

#[test]
fn test_decode_failure_creates_nothing() {
    let setup = setup();
    let pipeline = ConvertPipeline::with_decoder(
        MockDecoder {
            width: 4,
            height: 4,
            fail: true,
        },
        ConvertConfig::default(),
    );

    let result = pipeline.convert_file(&setup.input, &setup.output);
    assert!(matches!(result, Err(ConvertError::Decode(_))));
    assert_eq!(result.unwrap_err().exit_code(), 4);
    assert!(!setup.output.exists());
}

#[test]
fn test_missing_input_is_reported_with_its_path() {
    let setup = setup();
    let pipeline = ConvertPipeline::with_decoder(
        MockDecoder {
            width: 4,
            height: 4,
            fail: false,
        },
        ConvertConfig::default(),
    );

    let missing = setup.input.parent().unwrap().join("nope.arw");
    let result = pipeline.convert_file(&missing, &setup.output);
    match result {
        Err(ConvertError::InputRead { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an input read error, got {other:?}"),
    }
}

#[test]
fn test_artist_is_carried_into_the_output() {
    let setup = setup();
    let config = ConvertConfig::builder().artist("you").build();
    let pipeline = ConvertPipeline::with_decoder(
        MockDecoder {
            width: 2,
            height: 2,
            fail: false,
        },
        config,
    );

    pipeline.convert_file(&setup.input, &setup.output).unwrap();

    let data = fs::read(&setup.output).unwrap();
    let mut decoder = Decoder::new(Cursor::new(data)).unwrap();
    assert_eq!(decoder.get_tag_ascii_string(Tag::Artist).unwrap(), "you");
}
