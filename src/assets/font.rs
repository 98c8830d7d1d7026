use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{SynthError, SynthResult};

/// A TrueType/OpenType font loaded once and shared by layout and rasterization.
#[derive(Clone)]
pub struct FontAsset {
    bytes: Arc<Vec<u8>>,
    raster: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FontAsset {
    /// Wrap raw font bytes. The bytes are validated when the first [`WordShaper`] is built.
    pub fn from_bytes(bytes: Vec<u8>) -> SynthResult<Self> {
        if bytes.is_empty() {
            return Err(SynthError::decode("font file is empty"));
        }
        let raster =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            raster,
        })
    }

    pub fn load(path: &Path) -> SynthResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| SynthError::io(format!("read font '{}': {e}", path.display())))?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub(crate) fn raster_font(&self) -> &vello_cpu::peniko::FontData {
        &self.raster
    }
}

/// Glyph id plus pen position relative to the word's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    pub id: u32,
    pub x: f32,
    /// Baseline position.
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct ShapedRun {
    pub font_size: f32,
    pub glyphs: Vec<PositionedGlyph>,
}

/// A single word shaped at one font size.
#[derive(Clone, Debug)]
pub struct ShapedWord {
    /// Advance width, rounded up to whole pixels.
    pub width: u32,
    /// Line height, rounded up to whole pixels.
    pub height: u32,
    pub runs: Vec<ShapedRun>,
}

/// Stateful helper that shapes words with Parley using one registered font family.
pub struct WordShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl WordShaper {
    /// Register `font` with fresh Parley contexts.
    pub fn new(font: &FontAsset) -> SynthResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SynthError::decode("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SynthError::decode("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `word` on a single unbroken line.
    pub fn shape(&mut self, word: &str, size_px: f32) -> SynthResult<ShapedWord> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SynthError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, word, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(word);
        layout.break_all_lines(None);

        let mut runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run
                    .positioned_glyphs()
                    .map(|g| PositionedGlyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                runs.push(ShapedRun {
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }

        Ok(ShapedWord {
            width: layout.width().max(0.0).ceil() as u32,
            height: layout.height().max(0.0).ceil() as u32,
            runs,
        })
    }

    /// Measured `(width, height)` of `word` in whole pixels.
    pub fn measure(&mut self, word: &str, size_px: f32) -> SynthResult<(u32, u32)> {
        let shaped = self.shape(word, size_px)?;
        Ok((shaped.width, shaped.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
