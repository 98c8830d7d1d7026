//! Photometric adjustments modelled on the classic "enhancer" formulation: every operation
//! is a linear blend `degenerate + factor * (image - degenerate)` against a degenerate image.
//! A factor of 1.0 is the identity, 0.0 yields the degenerate image, and factors above 1.0
//! extrapolate (clipped to the channel range). Alpha is never modified.

use image::RgbaImage;

use crate::foundation::math::{clamp_u8, luma};

fn blend_channel(degenerate: u8, value: u8, factor: f32) -> u8 {
    let d = f32::from(degenerate);
    clamp_u8(d + factor * (f32::from(value) - d))
}

/// Scale brightness against black.
pub fn brightness(src: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        for c in 0..3 {
            px.0[c] = blend_channel(0, px.0[c], factor);
        }
    }
    out
}

/// Scale contrast against a flat gray at the image's rounded mean luma.
pub fn contrast(src: &RgbaImage, factor: f32) -> RgbaImage {
    let mean = mean_luma(src);
    let mut out = src.clone();
    for px in out.pixels_mut() {
        for c in 0..3 {
            px.0[c] = blend_channel(mean, px.0[c], factor);
        }
    }
    out
}

/// Scale color saturation against the per-pixel grayscale.
pub fn saturation(src: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        let gray = luma(px.0[0], px.0[1], px.0[2]);
        for c in 0..3 {
            px.0[c] = blend_channel(gray, px.0[c], factor);
        }
    }
    out
}

/// Mean luma over every pixel, alpha ignored, rounded half up.
pub(crate) fn mean_luma(src: &RgbaImage) -> u8 {
    let count = u64::from(src.width()) * u64::from(src.height());
    if count == 0 {
        return 0;
    }
    let sum: u64 = src
        .pixels()
        .map(|px| u64::from(luma(px.0[0], px.0[1], px.0[2])))
        .sum();
    ((sum + count / 2) / count).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/enhance.rs"]
mod tests;
