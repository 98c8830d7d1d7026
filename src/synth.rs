//! Stages of the compositing pipeline, in data-flow order.

pub mod background;
pub mod compositor;
pub mod glyph;
pub mod layout;
pub mod paper;
pub mod placement;
