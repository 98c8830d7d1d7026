//! Generator configuration.
//!
//! Everything has a default matching the stock resource layout, so an empty JSON object is a
//! valid configuration. The CLI overlays its flags on top of whatever was loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SynthError, SynthResult};

/// Tunables of the compositing pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthParams {
    /// Gaussian sigma applied to the whole background.
    pub background_blur_sigma: f32,
    /// Paper size window, as fractions of the background width (both axes).
    pub paper_min_fraction: f64,
    pub paper_max_fraction: f64,
    /// Paper blur sigma is drawn from `[0, paper_blur_max_sigma]`.
    pub paper_blur_max_sigma: f32,
    /// Brightness, contrast and saturation factors are drawn from this closed range.
    pub enhance_range: (f32, f32),
    /// Paper rotation is drawn from the integers in `[-max_rotation_deg, max_rotation_deg]`.
    pub max_rotation_deg: i32,
    pub grid_rows: u32,
    pub grid_cols: u32,
    /// Chance that a visited grid cell receives the next word.
    pub cell_fill_probability: f64,
    pub min_font_px: u32,
    /// Font size as a fraction of the shorter paper side.
    pub font_fraction: f64,
    /// Chance that a word is blurred before being composited.
    pub word_blur_probability: f64,
    /// Word blur sigma is drawn from this closed range.
    pub word_blur_sigma: (f32, f32),
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            background_blur_sigma: 5.0,
            paper_min_fraction: 0.4,
            paper_max_fraction: 0.6,
            paper_blur_max_sigma: 2.0,
            enhance_range: (0.9, 1.1),
            max_rotation_deg: 15,
            grid_rows: 10,
            grid_cols: 5,
            cell_fill_probability: 0.5,
            min_font_px: 20,
            font_fraction: 0.05,
            word_blur_probability: 2.0 / 3.0,
            word_blur_sigma: (1.0, 5.0),
        }
    }
}

fn check_probability(name: &str, p: f64) -> SynthResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SynthError::validation(format!(
            "{name} must be within [0, 1], got {p}"
        )));
    }
    Ok(())
}

fn check_range(name: &str, (lo, hi): (f32, f32)) -> SynthResult<()> {
    if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || lo > hi {
        return Err(SynthError::validation(format!(
            "{name} must be a finite range with 0 <= lo <= hi, got ({lo}, {hi})"
        )));
    }
    Ok(())
}

impl SynthParams {
    pub fn validate(&self) -> SynthResult<()> {
        if !(self.background_blur_sigma.is_finite() && self.background_blur_sigma >= 0.0) {
            return Err(SynthError::validation(
                "background_blur_sigma must be finite and >= 0",
            ));
        }
        if !(0.0 < self.paper_min_fraction && self.paper_min_fraction <= self.paper_max_fraction)
        {
            return Err(SynthError::validation(
                "paper fractions must satisfy 0 < min <= max",
            ));
        }
        check_range("paper blur", (0.0, self.paper_blur_max_sigma))?;
        check_range("enhance_range", self.enhance_range)?;
        check_range("word_blur_sigma", self.word_blur_sigma)?;
        if !(0..=180).contains(&self.max_rotation_deg) {
            return Err(SynthError::validation(
                "max_rotation_deg must be within [0, 180]",
            ));
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(SynthError::validation("grid must have at least one cell"));
        }
        check_probability("cell_fill_probability", self.cell_fill_probability)?;
        check_probability("word_blur_probability", self.word_blur_probability)?;
        if self.min_font_px == 0 {
            return Err(SynthError::validation("min_font_px must be > 0"));
        }
        if !(self.font_fraction.is_finite() && self.font_fraction >= 0.0) {
            return Err(SynthError::validation(
                "font_fraction must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Paths and batch behaviour for a generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub backgrounds_dir: PathBuf,
    pub papers_dir: PathBuf,
    pub corpus_file: PathBuf,
    pub font_file: PathBuf,
    pub output_dir: PathBuf,
    /// Output file name; `{name}` is replaced by the background's file name.
    pub output_template: String,
    /// Fixed seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Continue with the next background after a per-image failure.
    pub keep_going: bool,
    pub params: SynthParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backgrounds_dir: PathBuf::from("resources/background"),
            papers_dir: PathBuf::from("resources/papers"),
            corpus_file: PathBuf::from("resources/corpus/deutch.txt"),
            font_file: PathBuf::from("resources/fonts/NotoSansDevanagari-Regular.ttf"),
            output_dir: PathBuf::from("output/deutch_output"),
            output_template: "overlay_{name}.jpg".to_string(),
            seed: None,
            keep_going: true,
            params: SynthParams::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> SynthResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| SynthError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> SynthResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SynthError::io(format!("read config '{}': {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> SynthResult<()> {
        if !self.output_template.contains("{name}") {
            return Err(SynthError::validation(
                "output_template must contain a {name} placeholder",
            ));
        }
        if self.output_template.contains('/') || self.output_template.contains('\\') {
            return Err(SynthError::validation(
                "output_template must be a bare file name",
            ));
        }
        self.params.validate()
    }

    /// Destination for the image generated from `background`.
    pub fn output_path_for(&self, background: &Path) -> SynthResult<PathBuf> {
        let name = background
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SynthError::validation(format!(
                    "background path '{}' has no usable file name",
                    background.display()
                ))
            })?;
        Ok(self
            .output_dir
            .join(self.output_template.replace("{name}", name)))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
