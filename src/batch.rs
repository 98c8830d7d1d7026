//! Per-background batch loop.
//!
//! Shared inputs (font, corpus, paper list) are loaded once and any failure there aborts the
//! run. After that, each background is processed independently: a failure is recorded in the
//! report and the loop moves on unless the config asks to stop.

use std::fmt;
use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::assets::corpus::Corpus;
use crate::assets::font::FontAsset;
use crate::assets::source::{DirImageSource, ImageSource};
use crate::config::GeneratorConfig;
use crate::foundation::error::{SynthError, SynthResult};
use crate::pipeline::Synthesizer;

/// Seeded generator when `seed` is set, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// What happened to one background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageOutcome {
    Written {
        background: PathBuf,
        paper: PathBuf,
        output: PathBuf,
    },
    Failed {
        background: PathBuf,
        reason: String,
    },
}

impl ImageOutcome {
    pub fn background(&self) -> &Path {
        match self {
            Self::Written { background, .. } | Self::Failed { background, .. } => background,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ImageOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} written, {} failed", self.written(), self.failed())
    }
}

/// Shared, already-loaded inputs of a batch.
#[derive(Debug)]
pub struct Batch {
    synth: Synthesizer,
    corpus: Corpus,
    papers: Vec<PathBuf>,
}

impl Batch {
    /// Load the font, corpus and paper list named by `config`.
    pub fn prepare(config: &GeneratorConfig) -> SynthResult<Self> {
        config.validate()?;
        let font = FontAsset::load(&config.font_file)?;
        let corpus = Corpus::load(&config.corpus_file)?;
        let papers = DirImageSource::new(&config.papers_dir).list()?;
        Self::from_parts(font, corpus, papers, config)
    }

    pub fn from_parts(
        font: FontAsset,
        corpus: Corpus,
        papers: Vec<PathBuf>,
        config: &GeneratorConfig,
    ) -> SynthResult<Self> {
        if papers.is_empty() {
            return Err(SynthError::validation("no paper textures available"));
        }
        let synth = Synthesizer::new(font, config.params.clone())?;
        Ok(Self {
            synth,
            corpus,
            papers,
        })
    }

    /// Generate one output per background listed by `backgrounds`.
    pub fn run<S, R>(
        &mut self,
        backgrounds: &S,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> SynthResult<BatchReport>
    where
        S: ImageSource + ?Sized,
        R: Rng + ?Sized,
    {
        let backgrounds = backgrounds.list()?;
        tracing::info!(
            backgrounds = backgrounds.len(),
            papers = self.papers.len(),
            corpus_lines = self.corpus.len(),
            "starting batch"
        );

        let mut report = BatchReport::default();
        for background in backgrounds {
            let outcome = self.process_one(&background, config, rng);
            let stop = match &outcome {
                ImageOutcome::Failed { reason, .. } => {
                    tracing::warn!(background = %background.display(), %reason, "image failed");
                    !config.keep_going
                }
                ImageOutcome::Written { output, .. } => {
                    tracing::debug!(output = %output.display(), "image written");
                    false
                }
            };
            report.outcomes.push(outcome);
            if stop {
                break;
            }
        }

        tracing::info!(
            written = report.written(),
            failed = report.failed(),
            "batch finished"
        );
        Ok(report)
    }

    fn process_one<R: Rng + ?Sized>(
        &mut self,
        background: &Path,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> ImageOutcome {
        let paper = self.papers[rng.random_range(0..self.papers.len())].clone();
        let text = self.corpus.pick(rng);
        let result = config.output_path_for(background).and_then(|output| {
            self.synth
                .generate_from_paths(background, &paper, &text, &output, rng)
                .map(|_| output)
        });
        match result {
            Ok(output) => ImageOutcome::Written {
                background: background.to_path_buf(),
                paper,
                output,
            },
            Err(e) => ImageOutcome::Failed {
                background: background.to_path_buf(),
                reason: e.to_string(),
            },
        }
    }
}

/// Run a whole batch from `config`: backgrounds from `backgrounds_dir`, outputs into
/// `output_dir`.
pub fn run_batch<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> SynthResult<BatchReport> {
    let mut batch = Batch::prepare(config)?;
    batch.run(&DirImageSource::new(&config.backgrounds_dir), config, rng)
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
