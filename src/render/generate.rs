//! Drawables generator - turns a pixel grid into a grid of directive chains.
//!
//! The image is cut into cells of [`TILE_WIDTH`]×[`TILE_HEIGHT`] pixels.
//! Each cell is optimized on its own so regions never straddle two cells,
//! and every region becomes one directive anchored at the hand position.

use crate::error::{DrawError, Result};
use crate::types::{is_skipped, Colour, IgnoreColour, PixelGrid, Rect, Region};

use super::directive::{chain, encode, Anchor, Directive, DirectiveFlags};
use super::optimize::optimize_within;

/// Cell width in source pixels.
pub const TILE_WIDTH: u32 = 32;

/// Cell height in source pixels.
pub const TILE_HEIGHT: u32 = 8;

/// Upscale factor used by [`generate_scaled`].
pub const SCALED_FACTOR: u32 = 2;

/// How a caller wants the image drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Regions over a neutral filler background.
    #[default]
    Plain,
    /// Regions fade out over a transparent background.
    Fade,
    /// One upscaled whole-image chain.
    Scale,
}

impl DrawMode {
    /// Resolve the scale and fade switches. Only one may be set.
    pub fn from_flags(scale: bool, fade: bool) -> Result<Self> {
        match (scale, fade) {
            (true, true) => Err(DrawError::Policy {
                message: "scale and fade cannot be used together".to_string(),
                help: Some("Pick either --scale or --fade".to_string()),
            }),
            (true, false) => Ok(DrawMode::Scale),
            (false, true) => Ok(DrawMode::Fade),
            (false, false) => Ok(DrawMode::Plain),
        }
    }

    /// Background policy matching this mode.
    pub fn replace_blank(self) -> bool {
        self != DrawMode::Fade
    }
}

/// Parameters for a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateOptions {
    pub hand_x: i32,
    pub hand_y: i32,
    pub ignore: Option<IgnoreColour>,
    /// Recolour pure white explicitly instead of passing the base through.
    pub replace_white: bool,
    /// Fill blank cell backgrounds instead of fading regions out.
    pub replace_blank: bool,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hand(mut self, x: i32, y: i32) -> Self {
        self.hand_x = x;
        self.hand_y = y;
        self
    }

    /// Set the ignore colour from a hex string, failing on malformed input.
    pub fn with_ignore_hex(mut self, hex: Option<&str>) -> Result<Self> {
        self.ignore = hex.map(IgnoreColour::parse).transpose()?;
        Ok(self)
    }

    pub fn with_replace_white(mut self, replace_white: bool) -> Self {
        self.replace_white = replace_white;
        self
    }

    pub fn with_replace_blank(mut self, replace_blank: bool) -> Self {
        self.replace_blank = replace_blank;
        self
    }
}

/// One occupied cell of the output grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawable {
    pub column: u32,
    pub row: u32,
    /// Filler drawn underneath the regions when blanks are replaced.
    pub background: Option<Directive>,
    pub directives: Vec<Directive>,
}

impl Drawable {
    /// The cell's full directive chain.
    pub fn text(&self) -> String {
        chain(self.background.iter().chain(&self.directives))
    }
}

/// The result of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawablesOutput {
    columns: u32,
    rows: u32,
    cells: Vec<Option<Drawable>>,
    width: u32,
    height: u32,
    hand: (i32, i32),
    scale: u32,
    replace_blank: bool,
}

impl DrawablesOutput {
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Source image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Source image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn hand(&self) -> (i32, i32) {
        self.hand
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn replace_blank(&self) -> bool {
        self.replace_blank
    }

    /// Get the cell at a column and row, if it is occupied.
    pub fn get(&self, column: u32, row: u32) -> Option<&Drawable> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells
            .get((row * self.columns + column) as usize)
            .and_then(Option::as_ref)
    }

    /// Occupied cells, row-major.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.cells.iter().flatten()
    }

    /// Every region directive, in cell order then region order.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.drawables().flat_map(|d| d.directives.iter())
    }

    pub fn directive_count(&self) -> usize {
        self.directives().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// All occupied cells' chains concatenated.
    pub fn text(&self) -> String {
        self.drawables().map(Drawable::text).collect()
    }
}

/// Generate a directive grid from a pixel grid.
pub fn generate(grid: &PixelGrid, options: &GenerateOptions) -> Result<DrawablesOutput> {
    let source = prepare(grid, options);
    let anchor = Anchor::new(options.hand_x, options.hand_y, grid.height());
    let flags = DirectiveFlags {
        fade: !options.replace_blank,
        scale: 1,
    };

    let columns = grid.width().div_ceil(TILE_WIDTH);
    let rows = grid.height().div_ceil(TILE_HEIGHT);
    let mut cells = Vec::with_capacity((columns * rows) as usize);

    for row in 0..rows {
        for column in 0..columns {
            let tile = Rect::new(column * TILE_WIDTH, row * TILE_HEIGHT, TILE_WIDTH, TILE_HEIGHT);
            let regions = optimize_within(&source, tile, options.ignore.as_ref());
            if regions.is_empty() {
                cells.push(None);
                continue;
            }

            let background = options
                .replace_blank
                .then(|| tile.intersect(&source.bounds()))
                .flatten()
                .map(|bounds| encode(&Region::covering(bounds, Colour::FILLER), &anchor, flags))
                .transpose()?;

            let directives = regions
                .iter()
                .map(|region| encode(region, &anchor, flags))
                .collect::<Result<Vec<_>>>()?;

            cells.push(Some(Drawable {
                column,
                row,
                background,
                directives,
            }));
        }
    }

    let output = DrawablesOutput {
        columns,
        rows,
        cells,
        width: grid.width(),
        height: grid.height(),
        hand: (options.hand_x, options.hand_y),
        scale: 1,
        replace_blank: options.replace_blank,
    };

    log::debug!(
        "generated {} directive(s) in {}x{} cell(s) for a {}x{} image",
        output.directive_count(),
        columns,
        rows,
        grid.width(),
        grid.height()
    );

    Ok(output)
}

/// Generate from a decoded image with the parameters spelled out.
///
/// The ignore colour is validated before any pixel is read.
pub fn generate_image(
    image: &image::RgbaImage,
    hand_x: i32,
    hand_y: i32,
    ignore_colour: Option<&str>,
    replace_white: bool,
    replace_blank: bool,
) -> Result<DrawablesOutput> {
    let options = GenerateOptions::new()
        .with_hand(hand_x, hand_y)
        .with_ignore_hex(ignore_colour)?
        .with_replace_white(replace_white)
        .with_replace_blank(replace_blank);

    generate(&PixelGrid::from_image(image), &options)
}

/// Generate a single upscaled chain, one directive per visible pixel.
///
/// The whole image lands in cell (0, 0). Scaled output always draws over a
/// filled background, so `replace_blank` must be set.
pub fn generate_scaled(grid: &PixelGrid, options: &GenerateOptions) -> Result<DrawablesOutput> {
    if !options.replace_blank {
        return Err(DrawError::Policy {
            message: "scaled output cannot fade its background".to_string(),
            help: Some("Generate scaled output with replace_blank enabled".to_string()),
        });
    }

    let source = prepare(grid, options);
    let anchor = Anchor::new(options.hand_x, options.hand_y, grid.height());
    let flags = DirectiveFlags {
        fade: false,
        scale: SCALED_FACTOR,
    };

    let mut directives = Vec::new();
    for y in 0..source.height() {
        for x in 0..source.width() {
            let Some(colour) = source.get(x, y) else {
                continue;
            };
            if is_skipped(colour, options.ignore.as_ref()) {
                continue;
            }
            directives.push(encode(&Region::new(x, y, 1, 1, colour), &anchor, flags)?);
        }
    }

    let cell = (!directives.is_empty()).then_some(Drawable {
        column: 0,
        row: 0,
        background: None,
        directives,
    });

    log::debug!(
        "generated {} scaled directive(s) for a {}x{} image",
        cell.as_ref().map_or(0, |c| c.directives.len()),
        grid.width(),
        grid.height()
    );

    Ok(DrawablesOutput {
        columns: 1,
        rows: 1,
        cells: vec![cell],
        width: grid.width(),
        height: grid.height(),
        hand: (options.hand_x, options.hand_y),
        scale: SCALED_FACTOR,
        replace_blank: true,
    })
}

/// Apply colour substitutions that happen before optimization.
fn prepare(grid: &PixelGrid, options: &GenerateOptions) -> PixelGrid {
    if !options.replace_white {
        return grid.clone();
    }

    grid.map_colours(|c| {
        if c.is_white() && !c.is_transparent() && !is_skipped(c, options.ignore.as_ref()) {
            Colour::PLACEHOLDER.with_alpha(c.a)
        } else {
            c
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn magenta() -> Colour {
        Colour::rgb(255, 0, 255)
    }

    #[test]
    fn test_single_magenta_pixel() {
        let grid = PixelGrid::filled(1, 1, magenta());
        let output = generate(&grid, &GenerateOptions::new().with_replace_blank(true)).unwrap();

        assert_eq!(output.directive_count(), 1);
        let directive = output.directives().next().unwrap();
        assert_eq!(directive.offset, (0, 0));
        assert_eq!(directive.recolour(), Some(magenta()));
        assert_eq!(
            output.get(0, 0).unwrap().directives[0].to_string(),
            "?scalenearest=1;1?replace=ffffff;ff00ff?offset=0;0"
        );
    }

    #[test]
    fn test_fully_ignored_image_is_empty() {
        let grid = PixelGrid::filled(40, 10, Colour::rgb(1, 2, 3));
        let options = GenerateOptions::new()
            .with_ignore_hex(Some("010203"))
            .unwrap()
            .with_replace_blank(true);
        let output = generate(&grid, &options).unwrap();

        assert!(output.is_empty());
        assert_eq!(output.directive_count(), 0);
        assert_eq!(output.text(), "");
        assert_eq!((output.columns(), output.rows()), (2, 2));
    }

    #[test]
    fn test_malformed_ignore_colour_fails_fast() {
        let err = GenerateOptions::new().with_ignore_hex(Some("ff00f")).unwrap_err();
        assert!(matches!(err, DrawError::InvalidColour { ref value } if value == "ff00f"));
    }

    #[test]
    fn test_cells_split_regions() {
        let grid = PixelGrid::filled(40, 3, magenta());
        let output = generate(&grid, &GenerateOptions::new().with_replace_blank(true)).unwrap();

        assert_eq!((output.columns(), output.rows()), (2, 1));
        let left = output.get(0, 0).unwrap();
        let right = output.get(1, 0).unwrap();
        assert_eq!(left.directives[0].region, Region::new(0, 0, 32, 3, magenta()));
        assert_eq!(right.directives[0].region, Region::new(32, 0, 8, 3, magenta()));
        assert_eq!(right.directives[0].offset, (64, 0));
    }

    #[test]
    fn test_background_filler_clipped_to_image() {
        let grid = PixelGrid::filled(3, 2, magenta());
        let output = generate(&grid, &GenerateOptions::new().with_replace_blank(true)).unwrap();

        let cell = output.get(0, 0).unwrap();
        let background = cell.background.as_ref().unwrap();
        assert_eq!(background.region, Region::new(0, 0, 3, 2, Colour::FILLER));
        assert!(cell.text().starts_with("?scalenearest=3;2?replace=ffffff;ffffff01"));
    }

    #[test]
    fn test_fade_when_blanks_kept() {
        let grid = PixelGrid::filled(1, 1, magenta());
        let output = generate(&grid, &GenerateOptions::new()).unwrap();

        let cell = output.get(0, 0).unwrap();
        assert!(cell.background.is_none());
        assert!(cell.directives[0].flags.fade);
        assert!(cell.text().ends_with("?border=1;ff00ff00;00000000"));
    }

    #[test]
    fn test_replace_white() {
        let grid = PixelGrid::filled(1, 1, Colour::WHITE);

        let plain = generate(&grid, &GenerateOptions::new().with_replace_blank(true)).unwrap();
        assert_eq!(plain.directives().next().unwrap().recolour(), None);

        let options = GenerateOptions::new().with_replace_blank(true).with_replace_white(true);
        let replaced = generate(&grid, &options).unwrap();
        assert_eq!(
            replaced.directives().next().unwrap().recolour(),
            Some(Colour::PLACEHOLDER)
        );
    }

    #[test]
    fn test_replace_white_keeps_ignored_white() {
        let grid = PixelGrid::filled(2, 1, Colour::WHITE);
        let options = GenerateOptions::new()
            .with_ignore_hex(Some("ffffff"))
            .unwrap()
            .with_replace_white(true);

        assert!(generate(&grid, &options).unwrap().is_empty());
    }

    #[test]
    fn test_hand_offset_applies_to_every_region() {
        let grid = PixelGrid::from_rows(vec![
            vec![magenta(), Colour::TRANSPARENT],
            vec![Colour::TRANSPARENT, magenta()],
        ]);
        let options = GenerateOptions::new().with_hand(1, -2).with_replace_blank(true);
        let output = generate(&grid, &options).unwrap();

        let offsets: Vec<(i32, i32)> = output.directives().map(|d| d.offset).collect();
        assert_eq!(offsets, vec![(-2, 6), (0, 4)]);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let grid = PixelGrid::from_rows(vec![
            vec![magenta(), Colour::WHITE, Colour::rgb(1, 2, 3)],
            vec![Colour::rgb(1, 2, 3), magenta(), magenta()],
        ]);
        let options = GenerateOptions::new().with_hand(4, 4);

        let a = generate(&grid, &options).unwrap();
        let b = generate(&grid, &options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.text(), b.text());
    }

    #[test]
    fn test_draw_mode_policy() {
        assert_eq!(DrawMode::from_flags(false, false).unwrap(), DrawMode::Plain);
        assert_eq!(DrawMode::from_flags(true, false).unwrap(), DrawMode::Scale);
        assert_eq!(DrawMode::from_flags(false, true).unwrap(), DrawMode::Fade);

        let err = DrawMode::from_flags(true, true).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Policy);

        assert!(DrawMode::Scale.replace_blank());
        assert!(!DrawMode::Fade.replace_blank());
    }

    #[test]
    fn test_generate_scaled() {
        let grid = PixelGrid::from_rows(vec![vec![magenta(), magenta()]]);
        let options = GenerateOptions::new().with_replace_blank(true);
        let output = generate_scaled(&grid, &options).unwrap();

        assert_eq!(output.scale(), 2);
        assert_eq!((output.columns(), output.rows()), (1, 1));
        assert_eq!(
            output.get(0, 0).unwrap().text(),
            "?scalenearest=2;2?replace=ffffff;ff00ff?offset=0;0\
             ?scalenearest=2;2?replace=ffffff;ff00ff?offset=4;0"
        );
    }

    #[test]
    fn test_generate_scaled_rejects_fade() {
        let grid = PixelGrid::filled(1, 1, magenta());
        let err = generate_scaled(&grid, &GenerateOptions::new()).unwrap_err();
        assert!(matches!(err, DrawError::Policy { .. }));
    }

    #[test]
    fn test_generate_image_signature() {
        let mut img = image::RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 255, 255]));

        let output = generate_image(&img, 0, 0, None, true, true).unwrap();
        assert_eq!(output.directive_count(), 1);

        assert!(generate_image(&img, 0, 0, Some("zzzzzz"), true, true).is_err());
    }

    #[test]
    fn test_extreme_hand_fails_instead_of_wrapping() {
        let grid = PixelGrid::filled(1, 1, magenta());

        for (x, y) in [(i32::MIN, 0), (1_500_000_000, 0), (0, i32::MIN)] {
            let options = GenerateOptions::new().with_hand(x, y);
            let err = generate(&grid, &options).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
            assert!(matches!(err, DrawError::HandOffset { x: hx, y: hy } if hx == x && hy == y));

            let scaled = generate_scaled(&grid, &options.with_replace_blank(true));
            assert!(matches!(scaled, Err(DrawError::HandOffset { .. })));
        }
    }
}
