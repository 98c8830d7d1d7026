use image::RgbaImage;
use rand::Rng;

use crate::config::SynthParams;
use crate::effects::blur::gaussian_blur;
use crate::effects::enhance;
use crate::effects::geometry::{resize_paper, rotate_expand};
use crate::foundation::error::SynthResult;

/// Brightness, contrast and saturation factors applied to the paper, in that order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorCorrection {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl ColorCorrection {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> Self {
        Self {
            brightness: rng.random_range(lo..=hi),
            contrast: rng.random_range(lo..=hi),
            saturation: rng.random_range(lo..=hi),
        }
    }

    pub fn apply(&self, src: &RgbaImage) -> RgbaImage {
        let out = enhance::brightness(src, self.brightness);
        let out = enhance::contrast(&out, self.contrast);
        enhance::saturation(&out, self.saturation)
    }
}

/// Paper after every photometric and geometric adjustment.
#[derive(Clone, Debug)]
pub struct PreparedPaper {
    /// Size after resizing, before rotation. The word grid is laid over this extent.
    pub size: (u32, u32),
    pub rotated: RgbaImage,
    pub angle_deg: i32,
    pub blur_sigma: f32,
    pub correction: ColorCorrection,
}

/// Resize, blur, color-correct and rotate a paper texture for a background `bg_width` wide.
pub fn prepare_paper<R: Rng + ?Sized>(
    paper: &RgbaImage,
    bg_width: u32,
    params: &SynthParams,
    rng: &mut R,
) -> SynthResult<PreparedPaper> {
    let resized = resize_paper(
        paper,
        bg_width,
        (params.paper_min_fraction, params.paper_max_fraction),
    )?;

    let blur_sigma = rng.random_range(0.0..=params.paper_blur_max_sigma);
    let blurred = gaussian_blur(&resized, blur_sigma)?;

    let correction = ColorCorrection::sample(rng, params.enhance_range);
    let corrected = correction.apply(&blurred);

    let angle_deg = rng.random_range(-params.max_rotation_deg..=params.max_rotation_deg);
    let rotated = rotate_expand(&corrected, f64::from(angle_deg))?;

    tracing::debug!(
        width = resized.width(),
        height = resized.height(),
        blur_sigma,
        angle_deg,
        ?correction,
        "prepared paper"
    );

    Ok(PreparedPaper {
        size: resized.dimensions(),
        rotated,
        angle_deg,
        blur_sigma,
        correction,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/synth/paper.rs"]
mod tests;
