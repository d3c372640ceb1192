use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use rawcrop::logger;
use rawcrop::pipeline::{ConvertConfig, ConvertPipeline, CropSpec};

/// Convert a raw camera image into an uncompressed grayscale 16-bit TIFF,
/// optionally restricted to a rectangular region of the sensor frame.
#[derive(Parser, Debug)]
#[command(name = "rawcrop", version, about)]
struct Cli {
    /// Raw image to convert (ARW, CR2, NEF, DNG, ...)
    input: PathBuf,

    /// TIFF file to create
    output: PathBuf,

    /// Extract only this region of the sensor frame
    #[arg(
        long,
        num_args = 4,
        value_names = ["COL_START", "ROW_START", "NUM_COLS", "NUM_ROWS"]
    )]
    crop: Option<Vec<u32>>,

    /// Value for the TIFF Artist tag
    #[arg(long)]
    artist: Option<String>,
}

fn main() -> ExitCode {
    logger::init();

    let cli = Cli::parse();

    let crop = cli.crop.map(|values| CropSpec {
        col_start: values[0],
        row_start: values[1],
        num_cols: values[2],
        num_rows: values[3],
    });
    if let Some(spec) = &crop {
        info!(
            col_start = spec.col_start,
            row_start = spec.row_start,
            num_cols = spec.num_cols,
            num_rows = spec.num_rows,
            "crop box requested"
        );
    }

    let mut config = ConvertConfig::builder();
    if let Some(spec) = crop {
        config = config.crop(spec);
    }
    if let Some(artist) = cli.artist {
        config = config.artist(artist);
    }

    let pipeline = ConvertPipeline::new(config.build());
    match pipeline.convert_file(&cli.input, &cli.output) {
        Ok(()) => {
            info!("conversion successful");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
