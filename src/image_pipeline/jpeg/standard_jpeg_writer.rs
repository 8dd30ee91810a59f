use std::io::Write;
use image::{imageops, ExtendedColorType, ImageEncoder, RgbImage};
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::jpeg::types::ConversionConfig;
use crate::image_pipeline::jpeg::writer::JpegWriter;
use crate::image_pipeline::raw::types::Orientation;

pub struct StandardJpegWriter;

/// Applies the EXIF-style orientation so the frame displays upright.
fn orient(image: RgbImage, orientation: Orientation) -> RgbImage {
    match orientation {
        Orientation::Normal => image,
        Orientation::HorizontalFlip => imageops::flip_horizontal(&image),
        Orientation::Rotate180 => imageops::rotate180(&image),
        Orientation::VerticalFlip => imageops::flip_vertical(&image),
        Orientation::Transpose => imageops::flip_horizontal(&imageops::rotate90(&image)),
        Orientation::Rotate90 => imageops::rotate90(&image),
        Orientation::Transverse => imageops::flip_vertical(&imageops::rotate90(&image)),
        Orientation::Rotate270 => imageops::rotate270(&image),
    }
}

impl JpegWriter for StandardJpegWriter {
    fn write_jpeg(&self, image: &RgbImageData, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!(
            "Encoding JPEG image: {}x{} at quality {}",
            image.width, image.height, config.quality.value()
        );

        let width = u32::try_from(image.width)
            .map_err(|_| ConversionError::InvalidDimensions(image.width, image.height))?;
        let height = u32::try_from(image.height)
            .map_err(|_| ConversionError::InvalidDimensions(image.width, image.height))?;

        let frame = RgbImage::from_raw(width, height, image.data.clone()).ok_or_else(|| {
            ConversionError::EncodeError(format!(
                "pixel buffer of {} bytes does not match {}x{} RGB",
                image.data.len(), width, height
            ))
        })?;

        let frame = if config.apply_orientation {
            orient(frame, image.orientation)
        } else {
            frame
        };

        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, config.quality.value())
            .write_image(frame.as_raw(), frame.width(), frame.height(), ExtendedColorType::Rgb8)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("JPEG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
