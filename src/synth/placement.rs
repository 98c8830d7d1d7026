use image::RgbaImage;
use rand::Rng;

use crate::effects::composite::paste_with_alpha_mask;
use crate::foundation::core::PaperPlacement;

/// Pick a top-left offset that keeps the rotated paper on the background.
///
/// On an axis where the paper is at least as large as the background the offset is 0.
pub fn choose_placement<R: Rng + ?Sized>(
    background: (u32, u32),
    rotated_paper: (u32, u32),
    angle_deg: i32,
    rng: &mut R,
) -> PaperPlacement {
    let max_x = background.0.saturating_sub(rotated_paper.0);
    let max_y = background.1.saturating_sub(rotated_paper.1);
    let x = rng.random_range(0..=max_x);
    let y = rng.random_range(0..=max_y);
    PaperPlacement { x, y, angle_deg }
}

/// Paste the rotated paper at its placement, masked by the paper's own alpha.
pub fn place_paper(background: &mut RgbaImage, rotated_paper: &RgbaImage, at: PaperPlacement) {
    paste_with_alpha_mask(
        background,
        rotated_paper,
        i64::from(at.x),
        i64::from(at.y),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/synth/placement.rs"]
mod tests;
