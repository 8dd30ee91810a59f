//! Colour development: camera RGB at sensor levels to 8-bit sRGB.
//!
//! Black Level -> WB -> Color Matrix (Cam -> XYZ -> sRGB) -> sRGB transfer curve.

use crate::image_pipeline::raw::types::RawImageData;

/// Standard XYZ to sRGB D65 illuminant matrix
const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [ 3.2404542, -1.5371385, -0.4985314],
    [-0.9692660,  1.8760108,  0.0415560],
    [ 0.0556434, -0.2040259,  1.0572252],
];

const LUT_SIZE: usize = 1 << 16;

/// Combined camera to sRGB matrix, rows normalised so white maps to white.
pub fn cam_to_srgb(cam_to_xyz: &[[f32; 4]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0f32; 3]; 3];
    for r in 0..3 {
        for c in 0..3 {
            out[r][c] = (0..3).map(|k| XYZ_TO_SRGB[r][k] * cam_to_xyz[k][c]).sum();
        }
        let sum: f32 = out[r].iter().sum();
        if sum.is_finite() && sum.abs() > f32::EPSILON {
            for v in &mut out[r] {
                *v /= sum;
            }
        }
    }
    out
}

/// sRGB transfer curve for a linear value in [0, 1].
pub fn srgb_encode(linear: f32) -> f32 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn build_gamma_lut() -> Vec<u8> {
    (0..LUT_SIZE)
        .map(|i| {
            let linear = i as f32 / (LUT_SIZE - 1) as f32;
            (srgb_encode(linear) * 255.0).round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// Develops interleaved camera RGB samples into interleaved 8-bit sRGB.
///
/// Levels, white balance and colour matrix come from `raw`; `camera_rgb`
/// must hold three samples per pixel.
pub fn develop(raw: &RawImageData, camera_rgb: &[u16]) -> Vec<u8> {
    let matrix = cam_to_srgb(&raw.cam_to_xyz);
    let lut = build_gamma_lut();

    let green_wb = raw.wb_coeffs[1];
    let wb = [raw.wb_coeffs[0] / green_wb, 1.0, raw.wb_coeffs[2] / green_wb];

    let mut black = [0.0f32; 3];
    let mut scale = [0.0f32; 3];
    for ch in 0..3 {
        black[ch] = raw.blacklevels[ch] as f32;
        let range = (raw.whitelevels[ch] as f32 - black[ch]).max(1.0);
        scale[ch] = wb[ch] / range;
    }

    let max_index = (LUT_SIZE - 1) as f32;
    camera_rgb
        .chunks_exact(3)
        .flat_map(|px| {
            let mut lin = [0.0f32; 3];
            for ch in 0..3 {
                lin[ch] = ((px[ch] as f32 - black[ch]).max(0.0) * scale[ch]).min(1.0);
            }
            let mut out = [0u8; 3];
            for (r, slot) in out.iter_mut().enumerate() {
                let v = matrix[r][0] * lin[0] + matrix[r][1] * lin[1] + matrix[r][2] * lin[2];
                *slot = lut[(v.clamp(0.0, 1.0) * max_index) as usize];
            }
            out
        })
        .collect()
}
