use image::{Rgba, RgbaImage};

use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn composite_leaves_pixels_outside_footprint_untouched() {
    let mut dst = RgbaImage::from_pixel(6, 6, Rgba([10, 20, 30, 255]));
    let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));

    alpha_composite_at(&mut dst, &src, 2, 3);

    assert_eq!(dst.get_pixel(2, 3).0, [255, 0, 0, 255]);
    assert_eq!(dst.get_pixel(3, 4).0, [255, 0, 0, 255]);
    assert_eq!(dst.get_pixel(1, 3).0, [10, 20, 30, 255]);
    assert_eq!(dst.get_pixel(4, 3).0, [10, 20, 30, 255]);
    assert_eq!(dst.get_pixel(2, 5).0, [10, 20, 30, 255]);
}

#[test]
fn composite_skips_transparent_source_pixels() {
    let mut dst = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
    let src = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 0]));
    let before = dst.clone();
    alpha_composite_at(&mut dst, &src, 0, 0);
    assert_eq!(dst, before);
}

#[test]
fn composite_clips_at_edges() {
    let mut dst = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]));

    alpha_composite_at(&mut dst, &src, -2, 3);

    assert_eq!(dst.get_pixel(0, 3).0, [0, 0, 255, 255]);
    assert_eq!(dst.get_pixel(1, 3).0, [0, 0, 0, 255]);
    assert_eq!(dst.get_pixel(0, 2).0, [0, 0, 0, 255]);

    // fully outside is a no-op
    let before = dst.clone();
    alpha_composite_at(&mut dst, &src, 10, 10);
    assert_eq!(dst, before);
}

#[test]
fn composite_half_alpha_blends_over_opaque() {
    let mut dst = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
    alpha_composite_at(&mut dst, &src, 0, 0);
    let px = dst.get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert!((i16::from(px[0]) - 128).abs() <= 1);
}

#[test]
fn masked_paste_interpolates_alpha_too() {
    let mut dst = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
    paste_with_alpha_mask(&mut dst, &src, 0, 0);
    let px = dst.get_pixel(0, 0).0;
    assert_eq!(px[0], 128);
    // 128 * 128 / 255 + 255 * 127 / 255
    assert_eq!(px[3], 64 + 127);
}

#[test]
fn masked_paste_opaque_replaces() {
    let mut dst = RgbaImage::from_pixel(2, 1, Rgba([9, 9, 9, 255]));
    let src = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 255]));
    paste_with_alpha_mask(&mut dst, &src, 1, 0);
    assert_eq!(dst.get_pixel(1, 0).0, [200, 100, 50, 255]);
    assert_eq!(dst.get_pixel(0, 0).0, [9, 9, 9, 255]);
}
