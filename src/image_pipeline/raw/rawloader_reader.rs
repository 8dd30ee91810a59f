//! RAW image reader implementation using the rawloader library.
//!
//! This module provides support for reading various RAW image formats (NEF, ARW, CR2, DNG, etc.)
//! using the rawloader library. It handles decoding RAW sensor data, trimming the sensor border
//! and extracting the colour metadata needed to develop the image later on.

use std::io::Cursor;

use tracing::debug;
use rawloader::RawImageData as RawloaderImageData;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::raw::types::{CfaPattern, Orientation, RawImageData, NEUTRAL_CAM_TO_XYZ};
use crate::image_pipeline::raw::reader::RawImageReader;

/// RAW image reader that uses the rawloader library for decoding.
///
/// This reader supports any RAW format that rawloader can decode, including but not limited to:
/// - Nikon NEF
/// - Sony ARW
/// - Canon CR2
/// - Fujifilm RAF (Bayer sensors only)
pub struct RawLoaderReader;

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

/// The white level is the maximum value the sensor can produce, which gives its
/// actual bit depth (e.g. 4095 -> 12 bits, 16383 -> 14 bits).
fn bits_per_sample(whitelevels: &[u16; 4]) -> u32 {
    match whitelevels.iter().max().copied() {
        None | Some(0) => DEFAULT_BITS_PER_SAMPLE,
        Some(max) => U16_BITS - max.leading_zeros(),
    }
}

/// Region of the sensor that holds image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CropWindow {
    top: usize,
    left: usize,
    width: usize,
    height: usize,
}

impl CropWindow {
    /// `crops` is rawloader's `[top, right, bottom, left]` border. A border that
    /// would leave nothing is ignored.
    fn from_crops(width: usize, height: usize, crops: [usize; 4]) -> Self {
        let [top, right, bottom, left] = crops;
        let cropped_width = width.saturating_sub(left + right);
        let cropped_height = height.saturating_sub(top + bottom);
        if cropped_width == 0 || cropped_height == 0 {
            return Self { top: 0, left: 0, width, height };
        }
        Self { top, left, width: cropped_width, height: cropped_height }
    }

    fn is_full_frame(&self, width: usize, height: usize) -> bool {
        self.top == 0 && self.left == 0 && self.width == width && self.height == height
    }

    fn apply(&self, data: Vec<u16>, full_width: usize, cpp: usize) -> Vec<u16> {
        let row_len = self.width * cpp;
        let mut out = Vec::with_capacity(row_len * self.height);
        for row in self.top..self.top + self.height {
            let start = (row * full_width + self.left) * cpp;
            out.extend_from_slice(&data[start..start + row_len]);
        }
        out
    }
}

fn map_orientation(orientation: rawloader::Orientation) -> Orientation {
    match orientation {
        rawloader::Orientation::HorizontalFlip => Orientation::HorizontalFlip,
        rawloader::Orientation::Rotate180 => Orientation::Rotate180,
        rawloader::Orientation::VerticalFlip => Orientation::VerticalFlip,
        rawloader::Orientation::Transpose => Orientation::Transpose,
        rawloader::Orientation::Rotate90 => Orientation::Rotate90,
        rawloader::Orientation::Transverse => Orientation::Transverse,
        rawloader::Orientation::Rotate270 => Orientation::Rotate270,
        _ => Orientation::Normal,
    }
}

/// Missing white balance shows up as NaN in rawloader.
fn sanitize_wb(coeffs: [f32; 4]) -> [f32; 4] {
    let green = coeffs[1];
    if !green.is_finite() || green <= 0.0 {
        return [1.0; 4];
    }
    coeffs.map(|c| if c.is_finite() && c > 0.0 { c } else { green })
}

fn sanitize_matrix(matrix: [[f32; 4]; 3]) -> [[f32; 4]; 3] {
    let usable = matrix.iter().flatten().all(|v| v.is_finite())
        && matrix.iter().flatten().any(|&v| v != 0.0);
    if usable { matrix } else { NEUTRAL_CAM_TO_XYZ }
}

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// This method:
    /// 1. Decodes the RAW file using rawloader
    /// 2. Converts the data to u16 format (handles both integer and float RAW data)
    /// 3. Crops away the masked sensor border and works out the Bayer layout at the new origin
    /// 4. Calculates the actual bits per sample from the sensor's white level metadata
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use raw2jpeg::image_pipeline::{RawImageReader, RawLoaderReader};
    ///
    /// let reader = RawLoaderReader;
    /// let raw_bytes = std::fs::read("image.nef").unwrap();
    /// let image_data = reader.read_raw(&raw_bytes).unwrap();
    /// ```
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let cpp = decoded.cpp;
        if cpp != 1 && cpp != 3 {
            return Err(ConversionError::UnsupportedFormat(format!("{} components per pixel", cpp)));
        }

        debug!(
            "Decoded {} {}: {}x{}, cpp={}",
            decoded.clean_make, decoded.clean_model, decoded.width, decoded.height, cpp
        );

        let window = CropWindow::from_crops(decoded.width, decoded.height, decoded.crops);

        let cfa = if cpp == 3 {
            CfaPattern::Rggb
        } else {
            if decoded.cfa.width != 2 || decoded.cfa.height != 2 {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "CFA pattern {} ({}x{})",
                    decoded.cfa.name, decoded.cfa.width, decoded.cfa.height
                )));
            }
            let at = |row: usize, col: usize| decoded.cfa.color_at(window.top + row, window.left + col);
            CfaPattern::from_quad(at(0, 0), at(0, 1), at(1, 0), at(1, 1)).ok_or_else(|| {
                ConversionError::UnsupportedFormat(format!("CFA pattern {}", decoded.cfa.name))
            })?
        };

        let cam_to_xyz = sanitize_matrix(decoded.cam_to_xyz());
        let wb_coeffs = sanitize_wb(decoded.wb_coeffs);
        let orientation = map_orientation(decoded.orientation);
        let full_width = decoded.width;
        let full_height = decoded.height;
        let mut blacklevels = decoded.blacklevels;
        let mut whitelevels = decoded.whitelevels;

        // Integer data is taken as is, float data (normalized 0.0-1.0) is scaled to the u16 range
        let samples: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values,
            RawloaderImageData::Float(values) => {
                blacklevels = [0; 4];
                whitelevels = [u16::MAX; 4];
                values.iter().map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32) as u16).collect()
            }
        };

        if samples.len() < full_width * full_height * cpp {
            return Err(ConversionError::DecodeError(format!(
                "expected {} samples, decoder returned {}",
                full_width * full_height * cpp,
                samples.len()
            )));
        }

        let samples = if window.is_full_frame(full_width, full_height) {
            samples
        } else {
            debug!(
                "Cropping sensor area to {}x{} at ({}, {})",
                window.width, window.height, window.left, window.top
            );
            window.apply(samples, full_width, cpp)
        };

        let bits_per_sample = bits_per_sample(&whitelevels);
        debug!("Calculated bits_per_sample: {} (white levels: {:?})", bits_per_sample, whitelevels);

        Ok(RawImageData {
            width: window.width,
            height: window.height,
            data: samples,
            cpp,
            bits_per_sample,
            cfa,
            blacklevels,
            whitelevels,
            wb_coeffs,
            cam_to_xyz,
            orientation,
        })
    }
}
