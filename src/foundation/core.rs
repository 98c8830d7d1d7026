pub use kurbo::{Affine, Point};

/// Integer pixel position. Anchors may be negative when a word is wider than its cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPos {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl PixelPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Where the rotated paper lands on the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaperPlacement {
    /// Left edge of the rotated paper's bounding box.
    pub x: u32,
    /// Top edge of the rotated paper's bounding box.
    pub y: u32,
    /// Counter-clockwise rotation shared by the paper and its word canvas.
    pub angle_deg: i32,
}

/// One cell of the logical word grid laid over the unrotated paper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

/// Ink used for one word. Always fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InkColor {
    Black,
    Red,
    Blue,
}

impl InkColor {
    /// Weighted draw table: four parts black, one part red, one part blue.
    pub const TABLE: [InkColor; 6] = [
        InkColor::Black,
        InkColor::Black,
        InkColor::Black,
        InkColor::Black,
        InkColor::Red,
        InkColor::Blue,
    ];

    pub fn rgba(self) -> [u8; 4] {
        match self {
            InkColor::Black => [0, 0, 0, 255],
            InkColor::Red => [255, 0, 0, 255],
            InkColor::Blue => [0, 0, 255, 255],
        }
    }
}

/// A word assigned to a grid cell, before ink and blur are chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPlacement {
    pub word: String,
    pub cell: GridCell,
    /// Top-left of the word's measured box on the unrotated word canvas.
    pub anchor: PixelPos,
}

/// A word as it was actually drawn onto the word canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedWord {
    pub word: String,
    pub cell: GridCell,
    pub anchor: PixelPos,
    pub ink: InkColor,
    /// Gaussian sigma applied to the word's layer, `None` for sharp words.
    pub blur_sigma: Option<f32>,
}
