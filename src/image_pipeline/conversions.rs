//! Pipeline conversions module
//!
//! This module contains orchestration logic for RAW to JPEG conversion.

mod output;
mod raw_to_jpeg;
mod timing;

#[cfg(test)]
mod tests;

pub use output::{default_output_path, OUTPUT_EXTENSION};
pub use raw_to_jpeg::RawToJpegPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
