//! Batch conversion of camera RAW files to JPEG.
//!
//! [`image_pipeline`] turns one RAW file into a JPEG (rawloader decode, bayer
//! demosaic, colour development, image encode). [`batch`] walks a folder and
//! drives the pipeline file by file. [`cli`] and [`logger`] back the binary.

pub mod batch;
pub mod cli;
pub mod image_pipeline;
pub mod logger;
