//! Decoded source pixels and the rules for skipping them.

use std::fmt;
use std::path::Path;

use image::RgbaImage;

use crate::error::{DrawError, Result};

use super::Colour;

/// Total pixel count above which callers should confirm intent.
pub const PIXEL_LIMIT: usize = 32768;

/// A colour whose pixels are left out of generation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreColour {
    pub colour: Colour,
    /// When false only the RGB channels are compared.
    pub alpha_significant: bool,
}

impl IgnoreColour {
    /// Parse `RRGGBB` (alpha ignored) or `RRGGBBAA` (alpha compared).
    pub fn parse(s: &str) -> Result<Self> {
        let colour = Colour::from_hex(s)?;
        let digits = s.trim().trim_start_matches('#').len();
        Ok(Self {
            colour,
            alpha_significant: digits == 8,
        })
    }

    /// Check whether a pixel colour matches.
    pub fn matches(&self, other: Colour) -> bool {
        let rgb = self.colour.r == other.r && self.colour.g == other.g && self.colour.b == other.b;
        rgb && (!self.alpha_significant || self.colour.a == other.a)
    }
}

/// An axis-aligned rectangle of pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Intersection with another rectangle, if they overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > x && bottom > y).then(|| Rect::new(x, y, right - x, bottom - y))
    }
}

/// Returned when an image is larger than [`PIXEL_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeWarning {
    pub width: u32,
    pub height: u32,
    pub pixels: usize,
    pub limit: usize,
}

impl fmt::Display for SizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The image ({}x{}={}) exceeds the limit of {} total pixels",
            self.width, self.height, self.pixels, self.limit
        )
    }
}

/// A decoded image: row-major colours with y growing downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl PixelGrid {
    /// Build a grid from rows of colours. Short rows are padded with
    /// transparent pixels.
    pub fn from_rows(rows: Vec<Vec<Colour>>) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for mut row in rows {
            row.resize(width as usize, Colour::TRANSPARENT);
            pixels.extend(row);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A grid filled with one colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; (width * height) as usize],
        }
    }

    pub fn from_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(|p| Colour::from(*p)).collect(),
        }
    }

    /// Decode an image file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DrawError::InvalidImage {
                path: path.to_path_buf(),
                message: "the file does not exist".to_string(),
            });
        }

        let image = image::open(path).map_err(|e| DrawError::InvalidImage {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self::from_image(&image.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Set a pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, colour: Colour) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = colour;
        }
    }

    /// Apply a colour mapping to every pixel.
    pub fn map_colours(&self, f: impl Fn(Colour) -> Colour) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Check the grid against [`PIXEL_LIMIT`].
    pub fn size_warning(&self) -> Option<SizeWarning> {
        let pixels = self.pixel_count();
        (pixels > PIXEL_LIMIT).then_some(SizeWarning {
            width: self.width,
            height: self.height,
            pixels,
            limit: PIXEL_LIMIT,
        })
    }
}

/// True when a pixel takes no part in generation.
pub fn is_skipped(colour: Colour, ignore: Option<&IgnoreColour>) -> bool {
    colour.is_transparent() || ignore.is_some_and(|i| i.matches(colour))
}
