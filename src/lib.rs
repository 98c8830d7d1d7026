//! Paperscribe synthesizes OCR training images: a crumpled paper texture carrying scattered,
//! randomly inked and blurred words, composited onto a blurred photographic background.
//!
//! The entry points are:
//!
//! - [`Synthesizer`] for one background/paper/text triple
//! - [`Batch`] and [`run_batch`] for a directory of backgrounds driven by a [`GeneratorConfig`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod effects;
pub(crate) mod synth;

/// Per-background batch driver.
pub mod batch;
/// Generator configuration.
pub mod config;
/// Single-image pipeline.
pub mod pipeline;

pub use crate::foundation::core::{
    GridCell, InkColor, PaperPlacement, PixelPos, RenderedWord, WordPlacement,
};
pub use crate::foundation::error::{SynthError, SynthResult};

pub use crate::assets::corpus::{Corpus, DEFAULT_MAX_SENTENCES, truncate_sentences};
pub use crate::assets::decode::{decode_raster, load_raster};
pub use crate::assets::font::FontAsset;
pub use crate::assets::source::{DirImageSource, ImageSource, StaticImageSource};
pub use crate::batch::{Batch, BatchReport, ImageOutcome, rng_from_seed, run_batch};
pub use crate::config::{GeneratorConfig, SynthParams};
pub use crate::pipeline::{GeneratedImage, Synthesizer};
pub use crate::synth::compositor::is_lossy_output;
pub use crate::synth::paper::ColorCorrection;
