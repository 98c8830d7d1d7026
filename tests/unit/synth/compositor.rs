use std::path::{Path, PathBuf};

use image::{ColorType, Rgba, RgbaImage};

use super::*;
use crate::synth::placement::place_paper;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_compositor")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn lossy_detection_ignores_case() {
    assert!(is_lossy_output(Path::new("a/overlay_x.jpg")));
    assert!(is_lossy_output(Path::new("overlay_x.JPEG")));
    assert!(!is_lossy_output(Path::new("overlay_x.png")));
    assert!(!is_lossy_output(Path::new("overlay_x")));
}

#[test]
fn finalize_drops_alpha_only_for_jpeg() {
    let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 128]));
    let jpg = finalize_for_output(img.clone(), Path::new("o.jpg"));
    assert_eq!(jpg.color(), ColorType::Rgb8);
    let png = finalize_for_output(img, Path::new("o.png"));
    assert_eq!(png.color(), ColorType::Rgba8);
}

#[test]
fn unrotated_words_land_at_paper_offset() {
    let mut bg = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
    let mut words = RgbaImage::new(4, 4);
    words.put_pixel(1, 2, Rgba([0, 0, 255, 255]));

    composite_words(
        &mut bg,
        &words,
        PaperPlacement {
            x: 5,
            y: 7,
            angle_deg: 0,
        },
    )
    .unwrap();

    assert_eq!(bg.get_pixel(6, 9).0, [0, 0, 255, 255]);
    assert_eq!(bg.get_pixel(5, 7).0, [255, 255, 255, 255]);
}

#[test]
fn rotated_words_stay_on_rotated_paper() {
    let angle = 11;
    let paper = RgbaImage::from_pixel(60, 40, Rgba([255, 255, 255, 255]));
    let mut words = RgbaImage::new(60, 40);
    for y in 8..11 {
        for x in 10..13 {
            words.put_pixel(x, y, Rgba([0, 0, 255, 255]));
        }
    }

    let rotated_paper = rotate_expand(&paper, f64::from(angle)).unwrap();
    let mut bg = RgbaImage::from_pixel(120, 100, Rgba([0, 0, 0, 255]));
    let at = PaperPlacement {
        x: 20,
        y: 15,
        angle_deg: angle,
    };
    place_paper(&mut bg, &rotated_paper, at);
    composite_words(&mut bg, &words, at).unwrap();

    // ink block center (11.5, 9.5) turned counter-clockwise about the paper center (30, 20)
    let (rw, rh) = rotated_paper.dimensions();
    let (dx, dy) = (11.5 - 30.0, 9.5 - 20.0);
    let (s, c) = f64::from(angle).to_radians().sin_cos();
    let ex = f64::from(rw) / 2.0 + c * dx + s * dy;
    let ey = f64::from(rh) / 2.0 - s * dx + c * dy;
    let (px, py) = (ex.floor() as u32, ey.floor() as u32);

    assert_eq!(rotated_paper.get_pixel(px, py).0[3], 255);
    let ink = bg.get_pixel(at.x + px, at.y + py).0;
    assert!(ink[2] > 200 && ink[0] < 80, "{ink:?} at ({px}, {py})");
}

#[test]
fn write_output_creates_directories_and_leaves_no_temp_file() {
    let dir = scratch_dir("nested");
    let out = dir.join("a").join("b").join("overlay_bg.png");
    let img = finalize_for_output(
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 200])),
        &out,
    );

    write_output(&img, &out).unwrap();
    // second write over an existing file and directory is fine
    write_output(&img, &out).unwrap();

    let back = image::open(&out).unwrap();
    assert_eq!(back.color(), ColorType::Rgba8);
    assert_eq!(back.to_rgba8().get_pixel(0, 0).0, [1, 2, 3, 200]);

    let leftovers: Vec<_> = std::fs::read_dir(out.parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn unknown_extension_is_rejected_before_writing() {
    let dir = scratch_dir("unknown_ext");
    let out = dir.join("overlay_bg.notaformat");
    let img = finalize_for_output(RgbaImage::new(1, 1), &out);
    let err = write_output(&img, &out).unwrap_err();
    assert!(matches!(err, SynthError::Validation(_)));
    assert!(!out.exists());
}
