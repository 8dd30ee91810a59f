//! Types for debayering operations

use crate::image_pipeline::raw::types::Orientation;

/// Display-ready image after debayering and colour development
#[derive(Debug, Clone)]
pub struct RgbImageData {
    /// Width of the image in pixels, before orientation is applied
    pub width: usize,
    /// Height of the image in pixels, before orientation is applied
    pub height: usize,
    /// 8-bit sRGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
    /// Orientation carried over from the RAW file
    pub orientation: Orientation,
}

/// Interpolation used to reconstruct the missing colours of each Bayer site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemosaicMethod {
    /// Fastest, blocky
    NearestNeighbour,
    /// Bilinear interpolation (default)
    #[default]
    Linear,
    /// Sharper, slower
    Cubic,
}

impl DemosaicMethod {
    /// Smallest width and height the bayer crate interpolates with this method.
    pub fn min_size(self) -> usize {
        match self {
            DemosaicMethod::NearestNeighbour | DemosaicMethod::Linear => 2,
            DemosaicMethod::Cubic => 4,
        }
    }
}
