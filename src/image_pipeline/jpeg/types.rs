//! RAW to JPEG conversion configuration types

use crate::image_pipeline::debayer::types::DemosaicMethod;

/// JPEG encoder quality, 1 (smallest) to 100 (best)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegQuality(u8);

impl JpegQuality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Clamps `value` into the encoder's accepted range.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN as u32, Self::MAX as u32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        Self(95)
    }
}

/// Configuration for RAW to JPEG conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Encoder quality
    pub quality: JpegQuality,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<usize>,
    /// Rotate/flip the output according to the camera's orientation tag
    pub apply_orientation: bool,
    /// Interpolation used for Bayer sensors
    pub demosaic: DemosaicMethod,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            quality: JpegQuality::default(),
            validate_dimensions: true,
            max_dimension: Some(50000),
            apply_orientation: true,
            demosaic: DemosaicMethod::Linear,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    quality: Option<JpegQuality>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    apply_orientation: Option<bool>,
    demosaic: Option<DemosaicMethod>,
}

impl ConversionConfigBuilder {
    pub fn quality(mut self, quality: JpegQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn apply_orientation(mut self, enable: bool) -> Self {
        self.apply_orientation = Some(enable);
        self
    }

    pub fn demosaic(mut self, method: DemosaicMethod) -> Self {
        self.demosaic = Some(method);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            quality: self.quality.unwrap_or(default.quality),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            apply_orientation: self.apply_orientation.unwrap_or(default.apply_orientation),
            demosaic: self.demosaic.unwrap_or(default.demosaic),
        }
    }
}
