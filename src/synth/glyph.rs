use image::RgbaImage;
use rand::Rng;

use crate::assets::font::{FontAsset, ShapedWord, WordShaper};
use crate::config::SynthParams;
use crate::effects::blur::{gaussian_blur, radius_for_sigma};
use crate::effects::composite::alpha_composite_at;
use crate::foundation::core::{InkColor, RenderedWord, WordPlacement};
use crate::foundation::error::{SynthError, SynthResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// Draw one ink color from the weighted table.
pub fn choose_ink<R: Rng + ?Sized>(rng: &mut R) -> InkColor {
    InkColor::TABLE[rng.random_range(0..InkColor::TABLE.len())]
}

/// Rasterize a shaped word in `ink` onto a transparent layer.
///
/// The layer is the word box grown by `pad` pixels on every side; the word's top-left sits at
/// `(pad, pad)`.
pub fn rasterize_word(
    font: &FontAsset,
    shaped: &ShapedWord,
    ink: InkColor,
    pad: u32,
) -> SynthResult<RgbaImage> {
    let width = shaped.width.saturating_add(pad.saturating_mul(2)).max(1);
    let height = shaped.height.saturating_add(pad.saturating_mul(2)).max(1);
    let w16: u16 = width
        .try_into()
        .map_err(|_| SynthError::text("word layer width exceeds u16"))?;
    let h16: u16 = height
        .try_into()
        .map_err(|_| SynthError::text("word layer height exceeds u16"))?;

    let [r, g, b, a] = ink.rgba();
    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(pad),
        f64::from(pad),
    )));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    for run in &shaped.runs {
        let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        ctx.glyph_run(font.raster_font())
            .font_size(run.font_size)
            .fill_glyphs(glyphs);
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);

    let mut rgba = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| SynthError::text("word layer byte length mismatch"))
}

/// Draws placed words onto a transparent canvas the size of the unrotated paper.
pub struct GlyphRenderer<'a> {
    font: &'a FontAsset,
    shaper: &'a mut WordShaper,
    font_size_px: f32,
    params: &'a SynthParams,
}

impl<'a> GlyphRenderer<'a> {
    pub fn new(
        font: &'a FontAsset,
        shaper: &'a mut WordShaper,
        font_size_px: f32,
        params: &'a SynthParams,
    ) -> Self {
        Self {
            font,
            shaper,
            font_size_px,
            params,
        }
    }

    /// Render every placement in order onto a fresh canvas of `canvas_size`.
    pub fn render<R: Rng + ?Sized>(
        &mut self,
        canvas_size: (u32, u32),
        placements: &[WordPlacement],
        rng: &mut R,
    ) -> SynthResult<(RgbaImage, Vec<RenderedWord>)> {
        let mut canvas = RgbaImage::new(canvas_size.0, canvas_size.1);
        let mut rendered = Vec::with_capacity(placements.len());
        for placement in placements {
            rendered.push(self.render_word(&mut canvas, placement, rng)?);
        }
        Ok((canvas, rendered))
    }

    /// Draw one word onto `canvas`.
    ///
    /// Blurred words go through their own layer so the blur never reaches words already on
    /// the canvas.
    pub fn render_word<R: Rng + ?Sized>(
        &mut self,
        canvas: &mut RgbaImage,
        placement: &WordPlacement,
        rng: &mut R,
    ) -> SynthResult<RenderedWord> {
        let blurred = rng.random_bool(self.params.word_blur_probability);
        let ink = choose_ink(rng);
        let blur_sigma = if blurred {
            let (lo, hi) = self.params.word_blur_sigma;
            Some(rng.random_range(lo..=hi))
        } else {
            None
        };

        let shaped = self.shaper.shape(&placement.word, self.font_size_px)?;
        // room for glyph overhang past the advance box, plus the blur kernel
        let overhang = (self.font_size_px / 4.0).ceil() as u32;
        let pad = overhang + blur_sigma.map_or(0, radius_for_sigma);

        let mut layer = rasterize_word(self.font, &shaped, ink, pad)?;
        if let Some(sigma) = blur_sigma {
            layer = gaussian_blur(&layer, sigma)?;
        }
        alpha_composite_at(
            canvas,
            &layer,
            i64::from(placement.anchor.x) - i64::from(pad),
            i64::from(placement.anchor.y) - i64::from(pad),
        );

        tracing::trace!(word = %placement.word, ?ink, ?blur_sigma, "rendered word");
        Ok(RenderedWord {
            word: placement.word.clone(),
            cell: placement.cell,
            anchor: placement.anchor,
            ink,
            blur_sigma,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/glyph.rs"]
mod tests;
