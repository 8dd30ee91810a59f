use tracing::{debug, info};
use std::io::Cursor;
use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::{color, DemosaicMethod, RgbImageData};
use crate::image_pipeline::raw::types::{CfaPattern, RawImageData};

pub struct CpuDebayer;

impl CpuDebayer {
    pub fn new() -> Self {
        Self
    }

    /// Demosaics (if needed) and develops a RAW frame into 8-bit sRGB.
    pub fn process(&self, raw_image: &RawImageData, method: DemosaicMethod) -> Result<RgbImageData> {
        let width = raw_image.width;
        let height = raw_image.height;
        let expected = width * height * raw_image.cpp;
        if raw_image.data.len() != expected {
            return Err(ConversionError::DemosaicError(format!(
                "expected {} samples for {}x{}x{}, got {}",
                expected, width, height, raw_image.cpp, raw_image.data.len()
            )));
        }

        let data = if raw_image.cpp == 3 {
            debug!("Image is already RGB, skipping demosaic");
            color::develop(raw_image, &raw_image.data)
        } else {
            let camera_rgb = self.demosaic(raw_image, method)?;
            color::develop(raw_image, &camera_rgb)
        };

        Ok(RgbImageData {
            width,
            height,
            data,
            orientation: raw_image.orientation,
        })
    }

    fn demosaic(&self, raw_image: &RawImageData, method: DemosaicMethod) -> Result<Vec<u16>> {
        let width = raw_image.width;
        let height = raw_image.height;
        if width < method.min_size() || height < method.min_size() {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        info!("Starting CPU debayering for image {}x{}", width, height);

        let cfa = match raw_image.cfa {
            CfaPattern::Rggb => CFA::RGGB,
            CfaPattern::Bggr => CFA::BGGR,
            CfaPattern::Grbg => CFA::GRBG,
            CfaPattern::Gbrg => CFA::GBRG,
        };
        let algorithm = match method {
            DemosaicMethod::NearestNeighbour => Demosaic::NearestNeighbour,
            DemosaicMethod::Linear => Demosaic::Linear,
            DemosaicMethod::Cubic => Demosaic::Cubic,
        };

        // The bayer crate only reads 8 or 16 bit streams, samples stay at sensor levels
        let narrow = raw_image.bits_per_sample <= 8;
        let (bayer_depth, raster_depth, bytes_per_sample) = if narrow {
            (BayerDepth::Depth8, RasterDepth::Depth8, 1)
        } else {
            (BayerDepth::Depth16LE, RasterDepth::Depth16, 2)
        };
        let bayer_bytes: Vec<u8> = if narrow {
            raw_image.data.iter().map(|&val| val.min(u8::MAX as u16) as u8).collect()
        } else {
            raw_image.data.iter()
                .flat_map(|&val| val.to_le_bytes())
                .collect()
        };

        let mut output_buf = vec![0u8; width * height * 3 * bytes_per_sample];
        let mut cursor = Cursor::new(&bayer_bytes[..]);

        debug!(
            "Running demosaic with CFA={:?}, algo={:?}, depth={:?}",
            raw_image.cfa, method, bayer_depth
        );

        let mut output_raster = RasterMut::new(
            width,
            height,
            raster_depth,
            &mut output_buf,
        );

        bayer::run_demosaic(
            &mut cursor,
            bayer_depth,
            cfa,
            algorithm,
            &mut output_raster,
        ).map_err(|e| ConversionError::DemosaicError(format!("{:?}", e)))?;

        // The raster holds native-endian words at 16 bit
        Ok(if narrow {
            output_buf.into_iter().map(u16::from).collect()
        } else {
            output_buf
                .chunks_exact(2)
                .map(|b| u16::from_ne_bytes([b[0], b[1]]))
                .collect()
        })
    }
}

impl Default for CpuDebayer {
    fn default() -> Self {
        Self::new()
    }
}
