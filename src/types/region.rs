//! Uniformly coloured rectangles of source pixels.

use super::{Colour, Rect};

/// A rectangle of pixels sharing one colour, in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub colour: Colour,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32, colour: Colour) -> Self {
        Self {
            x,
            y,
            width,
            height,
            colour,
        }
    }

    /// A region covering `rect` in a single colour.
    pub fn covering(rect: Rect, colour: Colour) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height, colour)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Sort key: row, then column, then colour value.
    pub(crate) fn order_key(&self) -> (u32, u32, Colour) {
        (self.y, self.x, self.colour)
    }
}
