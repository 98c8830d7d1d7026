use image::RgbaImage;

use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

fn premul(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255_u8(u16::from(px[0]), a),
        mul_div255_u8(u16::from(px[1]), a),
        mul_div255_u8(u16::from(px[2]), a),
        px[3],
    ]
}

fn unpremul(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let c = |v: u8| ((u32::from(v) * 255 + a / 2) / a).min(255) as u8;
            [c(px[0]), c(px[1]), c(px[2]), px[3]]
        }
    }
}

/// Overlapping rectangle of `src` placed at `(x, y)` on `dst`, as
/// `(dst_x0, dst_y0, src_x0, src_y0, w, h)`.
fn clip_region(
    dst: (u32, u32),
    src: (u32, u32),
    x: i64,
    y: i64,
) -> Option<(u32, u32, u32, u32, u32, u32)> {
    let dx0 = x.max(0);
    let dy0 = y.max(0);
    let dx1 = (x + i64::from(src.0)).min(i64::from(dst.0));
    let dy1 = (y + i64::from(src.1)).min(i64::from(dst.1));
    if dx1 <= dx0 || dy1 <= dy0 {
        return None;
    }
    Some((
        dx0 as u32,
        dy0 as u32,
        (dx0 - x) as u32,
        (dy0 - y) as u32,
        (dx1 - dx0) as u32,
        (dy1 - dy0) as u32,
    ))
}

/// Alpha-composite `src` over `dst` with its top-left at `(x, y)`.
///
/// Both rasters carry straight alpha. Pixels outside `src`'s footprint, and parts of `src`
/// falling outside `dst`, are left alone.
pub fn alpha_composite_at(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let Some((dx0, dy0, sx0, sy0, w, h)) = clip_region(dst.dimensions(), src.dimensions(), x, y)
    else {
        return;
    };
    for j in 0..h {
        for i in 0..w {
            let s = src.get_pixel(sx0 + i, sy0 + j).0;
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(dx0 + i, dy0 + j);
            d.0 = unpremul(over(premul(d.0), premul(s), 1.0));
        }
    }
}

/// Paste `src` onto `dst` at `(x, y)` using `src`'s own alpha as the mask.
///
/// Every channel, alpha included, is interpolated towards `src` by the mask value, which is
/// how a masked paste differs from [`alpha_composite_at`] on non-opaque destinations.
pub fn paste_with_alpha_mask(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let Some((dx0, dy0, sx0, sy0, w, h)) = clip_region(dst.dimensions(), src.dimensions(), x, y)
    else {
        return;
    };
    for j in 0..h {
        for i in 0..w {
            let s = src.get_pixel(sx0 + i, sy0 + j).0;
            let m = u16::from(s[3]);
            if m == 0 {
                continue;
            }
            let inv = 255 - m;
            let d = dst.get_pixel_mut(dx0 + i, dy0 + j);
            for c in 0..4 {
                d.0[c] = mul_div255_u8(u16::from(s[c]), m)
                    .saturating_add(mul_div255_u8(u16::from(d.0[c]), inv));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
