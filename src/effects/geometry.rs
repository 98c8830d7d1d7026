use std::sync::Arc;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{SynthError, SynthResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Target paper size for a background of width `bg_width`.
///
/// Both axes are clamped into `[min_fraction * bg_width, max_fraction * bg_width]`. The height
/// bound is derived from the background *width* as well; see DESIGN.md.
pub fn clamp_paper_size(
    paper: (u32, u32),
    bg_width: u32,
    (min_fraction, max_fraction): (f64, f64),
) -> SynthResult<(u32, u32)> {
    let min = (f64::from(bg_width) * min_fraction) as u32;
    let max = (f64::from(bg_width) * max_fraction) as u32;
    if max == 0 {
        return Err(SynthError::validation(format!(
            "background width {bg_width} is too small to hold a paper"
        )));
    }
    let clamp = |v: u32| v.max(min).min(max);
    Ok((clamp(paper.0), clamp(paper.1)))
}

/// Lanczos resize into the clamped paper size. Returns a copy when no resize is needed.
pub fn resize_paper(
    paper: &RgbaImage,
    bg_width: u32,
    window: (f64, f64),
) -> SynthResult<RgbaImage> {
    let (w, h) = clamp_paper_size(paper.dimensions(), bg_width, window)?;
    if (w, h) == paper.dimensions() {
        return Ok(paper.clone());
    }
    Ok(imageops::resize(paper, w, h, FilterType::Lanczos3))
}

/// Counter-clockwise rotation about the raster center, in y-down pixel space.
fn rotation_about(center: Point, angle_deg: f64) -> Affine {
    Affine::translate(center.to_vec2())
        * Affine::rotate(-angle_deg.to_radians())
        * Affine::translate(-center.to_vec2())
}

// Trig round-off would otherwise turn an exact 90 degree extent into 1 extra pixel.
fn snap(v: f64) -> f64 {
    (v * 1e9).round() / 1e9
}

/// Size of the bounding box that holds a `width`x`height` raster rotated by `angle_deg`.
pub fn rotated_bounds(width: u32, height: u32, angle_deg: f64) -> (u32, u32) {
    if angle_deg.rem_euclid(360.0) == 0.0 {
        return (width, height);
    }
    let center = Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
    let rot = rotation_about(center, angle_deg);
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(f64::from(width), 0.0),
        Point::new(f64::from(width), f64::from(height)),
        Point::new(0.0, f64::from(height)),
    ]
    .map(|p| rot * p);

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in corners {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let w = snap(max_x).ceil() - snap(min_x).floor();
    let h = snap(max_y).ceil() - snap(min_y).floor();
    (w.max(0.0) as u32, h.max(0.0) as u32)
}

fn premul_bytes_to_pixmap(rgba8_premul: &[u8], width: u16, height: u16) -> vello_cpu::Pixmap {
    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();
    vello_cpu::Pixmap::from_parts_with_opacity(pixels, width, height, may_have_opacities)
}

fn to_u16(v: u32, what: &str) -> SynthResult<u16> {
    v.try_into()
        .map_err(|_| SynthError::validation(format!("{what} {v} exceeds u16")))
}

/// Rotate counter-clockwise by `angle_deg`, growing the canvas to fit the rotated content.
///
/// Uncovered corners are fully transparent. The raster is drawn as an image paint through
/// `vello_cpu` with bilinear sampling, so the same angle applied to two equally sized rasters
/// yields equally sized, aligned outputs.
pub fn rotate_expand(src: &RgbaImage, angle_deg: f64) -> SynthResult<RgbaImage> {
    if angle_deg.rem_euclid(360.0) == 0.0 {
        return Ok(src.clone());
    }
    let (sw, sh) = src.dimensions();
    let (dw, dh) = rotated_bounds(sw, sh, angle_deg);
    let (sw16, sh16) = (to_u16(sw, "raster width")?, to_u16(sh, "raster height")?);
    let (dw16, dh16) = (
        to_u16(dw, "rotated width")?,
        to_u16(dh, "rotated height")?,
    );
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
        return Ok(RgbaImage::new(dw, dh));
    }

    let src_center = Point::new(f64::from(sw) / 2.0, f64::from(sh) / 2.0);
    let dst_center = Point::new(f64::from(dw) / 2.0, f64::from(dh) / 2.0);
    let forward =
        Affine::translate(dst_center - src_center) * rotation_about(src_center, angle_deg);

    let mut premul = src.as_raw().clone();
    premultiply_rgba8_in_place(&mut premul);
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(premul_bytes_to_pixmap(
            &premul, sw16, sh16,
        ))),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let mut ctx = vello_cpu::RenderContext::new(dw16, dh16);
    ctx.set_transform(vello_cpu::kurbo::Affine::new(forward.as_coeffs()));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(sw),
        f64::from(sh),
    ));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(dw16, dh16);
    ctx.render_to_pixmap(&mut pixmap);

    let mut out = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut out);
    RgbaImage::from_raw(dw, dh, out)
        .ok_or_else(|| SynthError::validation("rotated buffer does not match raster size"))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/geometry.rs"]
mod tests;
