use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::foundation::core::{GridCell, PixelPos};

fn font() -> FontAsset {
    FontAsset::load(Path::new("tests/data/fonts/DejaVuSans.ttf")).unwrap()
}

fn placement(word: &str, x: i32, y: i32) -> WordPlacement {
    WordPlacement {
        word: word.to_string(),
        cell: GridCell { row: 0, col: 0 },
        anchor: PixelPos::new(x, y),
    }
}

#[test]
fn ink_draws_follow_four_one_one_weights() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut counts = [0usize; 3];
    for _ in 0..6000 {
        match choose_ink(&mut rng) {
            InkColor::Black => counts[0] += 1,
            InkColor::Red => counts[1] += 1,
            InkColor::Blue => counts[2] += 1,
        }
    }
    assert!((3700..=4300).contains(&counts[0]), "{counts:?}");
    assert!((800..=1200).contains(&counts[1]), "{counts:?}");
    assert!((800..=1200).contains(&counts[2]), "{counts:?}");
}

#[test]
fn ink_colors_are_opaque() {
    for ink in InkColor::TABLE {
        assert_eq!(ink.rgba()[3], 255);
    }
}

#[test]
fn rasterized_word_is_solid_ink_inside_glyphs() {
    let font = font();
    let mut shaper = WordShaper::new(&font).unwrap();
    let shaped = shaper.shape("Mut", 40.0).unwrap();
    let layer = rasterize_word(&font, &shaped, InkColor::Red, 4).unwrap();

    assert_eq!(layer.width(), shaped.width + 8);
    assert_eq!(layer.height(), shaped.height + 8);

    let opaque: Vec<_> = layer.pixels().filter(|p| p.0[3] == 255).collect();
    assert!(!opaque.is_empty());
    assert!(opaque.iter().all(|p| p.0 == [255, 0, 0, 255]));
    // padding ring stays clear
    assert!((0..layer.width()).all(|x| layer.get_pixel(x, 0).0[3] == 0));
}

#[test]
fn sharp_words_only_when_blur_disabled() {
    let font = font();
    let mut shaper = WordShaper::new(&font).unwrap();
    let params = SynthParams {
        word_blur_probability: 0.0,
        ..SynthParams::default()
    };
    let mut renderer = GlyphRenderer::new(&font, &mut shaper, 24.0, &params);
    let placements = vec![placement("Hallo", 10, 10), placement("Welt.", 90, 60)];

    let (canvas, rendered) = renderer
        .render((200, 120), &placements, &mut ChaCha8Rng::seed_from_u64(3))
        .unwrap();

    assert_eq!(canvas.dimensions(), (200, 120));
    assert_eq!(rendered.len(), 2);
    assert!(rendered.iter().all(|w| w.blur_sigma.is_none()));
    assert_eq!(rendered[1].word, "Welt.");

    let allowed = InkColor::TABLE.map(InkColor::rgba);
    for px in canvas.pixels().filter(|p| p.0[3] == 255) {
        assert!(allowed.contains(&px.0), "unexpected ink {:?}", px.0);
    }
}

#[test]
fn blurred_words_record_sigma_in_range() {
    let font = font();
    let mut shaper = WordShaper::new(&font).unwrap();
    let params = SynthParams {
        word_blur_probability: 1.0,
        ..SynthParams::default()
    };
    let mut renderer = GlyphRenderer::new(&font, &mut shaper, 24.0, &params);
    let placements = vec![placement("Wie", 5, 5), placement("geht", 60, 40)];

    let (canvas, rendered) = renderer
        .render((150, 100), &placements, &mut ChaCha8Rng::seed_from_u64(8))
        .unwrap();

    for w in &rendered {
        let sigma = w.blur_sigma.unwrap();
        assert!((1.0..=5.0).contains(&sigma));
    }
    assert!(canvas.pixels().any(|p| p.0[3] > 0));
}

#[test]
fn words_off_canvas_are_clipped_not_errors() {
    let font = font();
    let mut shaper = WordShaper::new(&font).unwrap();
    let params = SynthParams::default();
    let mut renderer = GlyphRenderer::new(&font, &mut shaper, 24.0, &params);
    let (canvas, rendered) = renderer
        .render(
            (40, 30),
            &[placement("abseits", -500, -500)],
            &mut ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap();
    assert_eq!(rendered.len(), 1);
    assert!(canvas.pixels().all(|p| p.0[3] == 0));
}
