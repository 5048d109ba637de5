//! Inventory icons: the merged chain pinned to the origin.

use crate::error::Result;

use super::generate::DrawablesOutput;
use super::merge::{merge_with, MergeOptions, MAX_CHAIN_LENGTH};

/// Largest icon canvas, in pixels per axis.
pub const ICON_SOURCE_SIZE: u32 = 64;

/// Build an inventory icon chain for `output`.
///
/// The icon is always anchored at (0, 0) whatever hand position the
/// output was generated with, and fades over a transparent canvas.
pub fn build_icon(output: &DrawablesOutput) -> Result<String> {
    merge_with(
        output,
        &MergeOptions {
            max_source_size: ICON_SOURCE_SIZE,
            fade: true,
            anchor: Some((0, 0)),
            max_chain_length: MAX_CHAIN_LENGTH,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::generate::{generate, GenerateOptions};
    use crate::types::{Colour, PixelGrid};

    #[test]
    fn test_icon_ignores_hand_offset() {
        let grid = PixelGrid::filled(2, 2, Colour::rgb(0, 128, 0));

        let at_origin = generate(&grid, &GenerateOptions::new()).unwrap();
        let moved = generate(&grid, &GenerateOptions::new().with_hand(-7, 12)).unwrap();

        assert_eq!(build_icon(&at_origin).unwrap(), build_icon(&moved).unwrap());
        assert!(build_icon(&moved).unwrap().starts_with("?scalenearest=2;2?replace=ffffff;00000000?offset=0;0"));
    }

    #[test]
    fn test_icon_too_large() {
        let grid = PixelGrid::filled(ICON_SOURCE_SIZE + 1, 1, Colour::rgb(0, 128, 0));
        let output = generate(&grid, &GenerateOptions::new()).unwrap();
        assert!(build_icon(&output).is_err());
    }
}
