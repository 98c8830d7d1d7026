//! One background, one paper, one line of text in; one composited raster out.

use std::path::Path;

use image::RgbaImage;
use rand::Rng;

use crate::assets::decode::load_raster;
use crate::assets::font::{FontAsset, WordShaper};
use crate::config::SynthParams;
use crate::foundation::core::{PaperPlacement, RenderedWord};
use crate::foundation::error::SynthResult;
use crate::synth::background::prepare_background;
use crate::synth::compositor::{composite_words, finalize_for_output, write_output};
use crate::synth::glyph::GlyphRenderer;
use crate::synth::layout::{font_size_for, layout_words};
use crate::synth::paper::{ColorCorrection, prepare_paper};
use crate::synth::placement::{choose_placement, place_paper};

/// Final raster plus a record of every random decision that shaped it.
#[derive(Clone, Debug)]
pub struct GeneratedImage {
    /// Same size as the input background, straight RGBA.
    pub image: RgbaImage,
    pub placement: PaperPlacement,
    /// Resized paper before rotation.
    pub paper_size: (u32, u32),
    pub rotated_paper_size: (u32, u32),
    /// Gaussian sigma applied to the resized paper.
    pub paper_blur_sigma: f32,
    pub paper_correction: ColorCorrection,
    pub font_size_px: u32,
    pub text: String,
    /// Drawn words in drawing order.
    pub words: Vec<RenderedWord>,
}

/// Runs the compositing stages with a fixed font and parameter set.
///
/// The shaper's font and layout contexts are reused across calls, so one synthesizer per batch
/// is the intended use.
pub struct Synthesizer {
    font: FontAsset,
    shaper: WordShaper,
    params: SynthParams,
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer")
            .field("font", &self.font)
            .field("family", &self.shaper.family_name())
            .field("params", &self.params)
            .finish()
    }
}

impl Synthesizer {
    pub fn new(font: FontAsset, params: SynthParams) -> SynthResult<Self> {
        params.validate()?;
        let shaper = WordShaper::new(&font)?;
        Ok(Self {
            font,
            shaper,
            params,
        })
    }

    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    pub fn font(&self) -> &FontAsset {
        &self.font
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(bg_w = background.width(), bg_h = background.height())
    )]
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        background: &RgbaImage,
        paper: &RgbaImage,
        text: &str,
        rng: &mut R,
    ) -> SynthResult<GeneratedImage> {
        let mut canvas = prepare_background(background, self.params.background_blur_sigma)?;

        let prepared = prepare_paper(paper, background.width(), &self.params, rng)?;
        let rotated_paper_size = prepared.rotated.dimensions();
        let placement = choose_placement(
            canvas.dimensions(),
            rotated_paper_size,
            prepared.angle_deg,
            rng,
        );
        place_paper(&mut canvas, &prepared.rotated, placement);

        let font_size_px = font_size_for(prepared.size, &self.params);
        let placements = layout_words(
            text,
            prepared.size,
            font_size_px as f32,
            &self.params,
            &mut self.shaper,
            rng,
        )?;

        let mut renderer = GlyphRenderer::new(
            &self.font,
            &mut self.shaper,
            font_size_px as f32,
            &self.params,
        );
        let (word_canvas, words) = renderer.render(prepared.size, &placements, rng)?;
        composite_words(&mut canvas, &word_canvas, placement)?;

        tracing::debug!(
            x = placement.x,
            y = placement.y,
            angle_deg = placement.angle_deg,
            font_size_px,
            words = words.len(),
            "composited"
        );

        Ok(GeneratedImage {
            image: canvas,
            placement,
            paper_size: prepared.size,
            rotated_paper_size,
            paper_blur_sigma: prepared.blur_sigma,
            paper_correction: prepared.correction,
            font_size_px,
            text: text.to_string(),
            words,
        })
    }

    /// [`Self::generate`] followed by encoding to `out` in the format its extension names.
    pub fn generate_to_file<R: Rng + ?Sized>(
        &mut self,
        background: &RgbaImage,
        paper: &RgbaImage,
        text: &str,
        out: &Path,
        rng: &mut R,
    ) -> SynthResult<GeneratedImage> {
        let generated = self.generate(background, paper, text, rng)?;
        let encoded = finalize_for_output(generated.image.clone(), out);
        write_output(&encoded, out)?;
        tracing::info!(path = %out.display(), words = generated.words.len(), "wrote image");
        Ok(generated)
    }

    /// Decode both rasters from disk and generate into `out`.
    pub fn generate_from_paths<R: Rng + ?Sized>(
        &mut self,
        background: &Path,
        paper: &Path,
        text: &str,
        out: &Path,
        rng: &mut R,
    ) -> SynthResult<GeneratedImage> {
        let bg = load_raster(background)?;
        let paper = load_raster(paper)?;
        self.generate_to_file(&bg, &paper, text, out, rng)
    }
}
