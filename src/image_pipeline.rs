
//! Image processing pipeline module
//!
//! This module provides a structured approach to image format conversions,
//! with separate modules for RAW reading, debayering, JPEG writing, and conversion orchestration.

pub mod raw;
pub mod debayer;
pub mod jpeg;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use raw::{
    CfaPattern,
    Orientation,
    RawImageData,
    RawImageReader,
    RawLoaderReader,
};

pub use debayer::{
    CpuDebayer,
    DemosaicMethod,
    RgbImageData,
};

pub use jpeg::{
    JpegQuality,
    ConversionConfig,
    ConversionConfigBuilder,
    JpegWriter,
    StandardJpegWriter,
};

pub use conversions::{
    default_output_path,
    OUTPUT_EXTENSION,
    PipelineTimings,
    RawToJpegPipeline,
};
