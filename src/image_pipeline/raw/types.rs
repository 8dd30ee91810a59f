//! RAW image data types

/// 2x2 colour filter array layouts, named by the top-left quad read row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfaPattern {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl CfaPattern {
    /// Builds a pattern from the colour indices of a 2x2 quad
    /// (0 = red, 1 = green, 2 = blue, 3 = second green).
    pub fn from_quad(top_left: usize, top_right: usize, bottom_left: usize, bottom_right: usize) -> Option<Self> {
        let norm = |c: usize| if c == 3 { 1 } else { c };
        match (norm(top_left), norm(top_right), norm(bottom_left), norm(bottom_right)) {
            (0, 1, 1, 2) => Some(CfaPattern::Rggb),
            (2, 1, 1, 0) => Some(CfaPattern::Bggr),
            (1, 0, 2, 1) => Some(CfaPattern::Grbg),
            (1, 2, 0, 1) => Some(CfaPattern::Gbrg),
            _ => None,
        }
    }
}

/// How the decoded frame has to be transformed to display upright,
/// following the EXIF orientation values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    HorizontalFlip,
    Rotate180,
    VerticalFlip,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    /// Whether displaying the frame swaps its width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose | Orientation::Rotate90 | Orientation::Transverse | Orientation::Rotate270
        )
    }
}

/// Represents decoded RAW image data
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Raw pixel data, single channel Bayer pattern or interleaved RGB when `cpp == 3`
    pub data: Vec<u16>,
    /// Components per pixel (1 for Bayer sensors, 3 for already demosaiced files)
    pub cpp: usize,
    /// Actual bits per sample from the sensor (e.g., 12, 14, or 16); 8 or less demosaics at 8-bit depth
    pub bits_per_sample: u32,
    /// Layout of the Bayer quad at the top-left pixel
    pub cfa: CfaPattern,
    /// Black level per channel (R, G, B, G2)
    pub blacklevels: [u16; 4],
    /// White level per channel (R, G, B, G2)
    pub whitelevels: [u16; 4],
    /// As-shot white balance multipliers (R, G, B, G2)
    pub wb_coeffs: [f32; 4],
    /// Camera RGB to CIE XYZ, 3 rows by up to 4 camera channels
    pub cam_to_xyz: [[f32; 4]; 3],
    pub orientation: Orientation,
}

impl RawImageData {
    /// Convenience constructor for a Bayer frame with neutral colour metadata.
    pub fn bayer(width: usize, height: usize, data: Vec<u16>, bits_per_sample: u32, cfa: CfaPattern) -> Self {
        let white = if bits_per_sample >= 16 {
            u16::MAX
        } else {
            ((1u32 << bits_per_sample) - 1) as u16
        };
        Self {
            width,
            height,
            data,
            cpp: 1,
            bits_per_sample,
            cfa,
            blacklevels: [0; 4],
            whitelevels: [white; 4],
            wb_coeffs: [1.0; 4],
            cam_to_xyz: NEUTRAL_CAM_TO_XYZ,
            orientation: Orientation::Normal,
        }
    }
}

/// Camera to XYZ matrix used when the decoder has no colour data for a camera.
/// It leaves camera RGB untouched after the XYZ to sRGB step is folded in.
pub const NEUTRAL_CAM_TO_XYZ: [[f32; 4]; 3] = [
    [0.4124564, 0.3575761, 0.1804375, 0.0],
    [0.2126729, 0.7151522, 0.0721750, 0.0],
    [0.0193339, 0.1191920, 0.9503041, 0.0],
];
