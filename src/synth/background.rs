use image::RgbaImage;

use crate::effects::blur::gaussian_blur;
use crate::foundation::error::SynthResult;

/// Blur the backdrop so the paper reads as the subject of the photo.
pub fn prepare_background(src: &RgbaImage, sigma: f32) -> SynthResult<RgbaImage> {
    tracing::debug!(
        width = src.width(),
        height = src.height(),
        sigma,
        "blurring background"
    );
    gaussian_blur(src, sigma)
}

#[cfg(test)]
#[path = "../../tests/unit/synth/background.rs"]
mod tests;
