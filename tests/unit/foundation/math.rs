use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![200u8, 100, 50, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 10, 20, 30, 255]);
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let src = vec![100u8, 50, 200, 128];
    let mut px = src.clone();
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px[3], 128);
    unpremultiply_rgba8_in_place(&mut px);
    for (a, b) in px.iter().zip(src.iter()) {
        assert!((i16::from(*a) - i16::from(*b)).abs() <= 1);
    }
}

#[test]
fn luma_of_primaries() {
    assert_eq!(luma(0, 0, 0), 0);
    assert_eq!(luma(255, 255, 255), 255);
    assert_eq!(luma(255, 0, 0), 76);
    assert_eq!(luma(0, 0, 255), 29);
}

#[test]
fn clamp_u8_saturates() {
    assert_eq!(clamp_u8(-3.0), 0);
    assert_eq!(clamp_u8(300.0), 255);
    assert_eq!(clamp_u8(12.4), 12);
}
