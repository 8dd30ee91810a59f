//! Command-line surface: `raw2jpeg <input_folder> [output_folder] [quality]`

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::batch::BatchConfig;
use crate::image_pipeline::{ConversionConfig, DemosaicMethod, JpegQuality};

/// Exit status for usage errors and batch-level failures.
pub const FAILURE_EXIT_CODE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemosaicArg {
    Nearest,
    Linear,
    Cubic,
}

impl From<DemosaicArg> for DemosaicMethod {
    fn from(arg: DemosaicArg) -> Self {
        match arg {
            DemosaicArg::Nearest => DemosaicMethod::NearestNeighbour,
            DemosaicArg::Linear => DemosaicMethod::Linear,
            DemosaicArg::Cubic => DemosaicMethod::Cubic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "raw2jpeg")]
#[command(version, about = "Batch-convert camera RAW files to JPEG")]
#[command(after_help = "Example: raw2jpeg '/Users/kb/Documents/Trip pics'")]
pub struct Cli {
    /// Folder holding the RAW files
    pub input_folder: PathBuf,

    /// Where to write the JPEGs (defaults to the input folder)
    pub output_folder: Option<PathBuf>,

    /// JPEG quality, 1-100
    #[arg(default_value_t = 95, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub quality: u32,

    /// RAW file extension to look for, matched case-insensitively
    #[arg(short, long, default_value = "nef")]
    pub extension: String,

    /// Demosaic algorithm for Bayer sensors
    #[arg(long, value_enum, default_value_t = DemosaicArg::Linear)]
    pub demosaic: DemosaicArg,

    /// Keep the sensor orientation instead of rotating to the camera's orientation tag
    #[arg(long)]
    pub no_rotate: bool,
}

impl Cli {
    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .quality(JpegQuality::new(self.quality))
            .demosaic(self.demosaic.into())
            .apply_orientation(!self.no_rotate)
            .build()
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::new(&self.input_folder)
            .with_output_dir(self.output_folder.clone())
            .with_extension(&self.extension)
    }
}

/// `--help` and `--version` exit cleanly, every other parse error is a failure.
pub fn exit_code_for(err: &clap::Error) -> u8 {
    if err.use_stderr() { FAILURE_EXIT_CODE } else { 0 }
}
