//! Viewport dimensions.

/// The logical drawing area the scene simulates in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport covering a terminal of `cols` x `rows` cells.
    ///
    /// Each cell holds two vertically stacked pixels, and every pixel spans
    /// `pixel_scale` logical units on both axes.
    pub fn from_cells(cols: u16, rows: u16, pixel_scale: f32) -> Self {
        Self::new(
            cols as f32 * pixel_scale,
            rows as f32 * 2.0 * pixel_scale,
        )
    }

    /// True when there is nothing to draw into.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
