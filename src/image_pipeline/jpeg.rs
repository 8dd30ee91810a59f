//! JPEG writing module
//!
//! This module provides JPEG encoding of developed images at a configurable quality.

mod writer;
mod standard_jpeg_writer;
pub mod types;

pub use writer::JpegWriter;
pub use standard_jpeg_writer::StandardJpegWriter;
pub use types::{JpegQuality, ConversionConfig, ConversionConfigBuilder};
