//! Core domain types for drawables.
//!
//! This module contains the values that flow through the pipeline:
//! - `Colour` - RGBA colour values
//! - `PixelGrid` - a decoded source image
//! - `IgnoreColour` - the colour excluded from generation
//! - `Region` - a uniformly coloured rectangle

mod colour;
mod pixel;
mod region;

pub use colour::Colour;
pub use pixel::{is_skipped, IgnoreColour, PixelGrid, Rect, SizeWarning, PIXEL_LIMIT};
pub use region::Region;
