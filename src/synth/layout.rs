//! Coarse word placement over a fixed grid.
//!
//! The unrotated paper is cut into `grid_rows x grid_cols` cells. Cells are visited in
//! row-major order with a cursor over the source words; each visited cell either takes the
//! next word (centered in the cell) or stays blank. Layout stops as soon as either the words
//! or the cells run out. Words are never repeated or synthesized to fill the grid.

use rand::Rng;

use crate::assets::font::WordShaper;
use crate::config::SynthParams;
use crate::foundation::core::{GridCell, PixelPos, WordPlacement};
use crate::foundation::error::SynthResult;

/// Measures the pixel box of a word at a given font size.
pub trait WordMeasure {
    fn measure(&mut self, word: &str, size_px: f32) -> SynthResult<(u32, u32)>;
}

impl WordMeasure for WordShaper {
    fn measure(&mut self, word: &str, size_px: f32) -> SynthResult<(u32, u32)> {
        WordShaper::measure(self, word, size_px)
    }
}

/// Font size for a paper of `paper` pixels: 5% of the shorter side, never below the minimum.
pub fn font_size_for(paper: (u32, u32), params: &SynthParams) -> u32 {
    let shorter = f64::from(paper.0.min(paper.1));
    ((shorter * params.font_fraction) as u32).max(params.min_font_px)
}

/// Whitespace-delimited words in source order.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Integer cell size of the layout grid over `paper`.
pub fn cell_size(paper: (u32, u32), params: &SynthParams) -> (u32, u32) {
    (paper.0 / params.grid_cols, paper.1 / params.grid_rows)
}

/// Top-left anchor that centers a `word` box inside `cell`.
pub fn anchor_in_cell(cell: GridCell, cell_size: (u32, u32), word: (u32, u32)) -> PixelPos {
    let (cw, ch) = (cell_size.0 as i32, cell_size.1 as i32);
    let (ww, wh) = (word.0 as i32, word.1 as i32);
    PixelPos::new(
        cell.col as i32 * cw + (cw - ww).div_euclid(2),
        cell.row as i32 * ch + (ch - wh).div_euclid(2),
    )
}

/// Assign words from `text` to grid cells over an unrotated paper of size `paper`.
pub fn layout_words<M, R>(
    text: &str,
    paper: (u32, u32),
    font_size_px: f32,
    params: &SynthParams,
    measure: &mut M,
    rng: &mut R,
) -> SynthResult<Vec<WordPlacement>>
where
    M: WordMeasure + ?Sized,
    R: Rng + ?Sized,
{
    let cell = cell_size(paper, params);
    let (rows, cols) = (params.grid_rows, params.grid_cols);
    let cells = (0..rows).flat_map(|row| (0..cols).map(move |col| GridCell { row, col }));

    let mut words = split_words(text).into_iter().peekable();
    let mut placed = Vec::new();

    for grid_cell in cells {
        let Some(&word) = words.peek() else {
            break;
        };
        if !rng.random_bool(params.cell_fill_probability) {
            continue;
        }
        let size = measure.measure(word, font_size_px)?;
        placed.push(WordPlacement {
            word: word.to_string(),
            cell: grid_cell,
            anchor: anchor_in_cell(grid_cell, cell, size),
        });
        words.next();
    }

    tracing::debug!(
        placed = placed.len(),
        left_over = words.count(),
        "laid out words"
    );
    Ok(placed)
}

#[cfg(test)]
#[path = "../../tests/unit/synth/layout.rs"]
mod tests;
