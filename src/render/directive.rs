//! Directive codec - encodes one compositing operation as text.
//!
//! Every directive draws one rectangle by transforming the shared 1×1 white
//! base texture. Operations are applied left to right:
//!
//! ```text
//! directive := scale recolour? offset fade?
//! scale     := "?scalenearest=" W ";" H
//! recolour  := "?replace=ffffff;" HEX
//! offset    := "?offset=" DX ";" DY
//! fade      := "?border=1;" RGB "00;00000000"
//! ```
//!
//! `HEX` is `rrggbb` for opaque colours and `rrggbbaa` otherwise. The
//! recolour op is left out when the target is opaque white, since the base
//! texture already is. Offsets are in half-pixel units: one source pixel is
//! two engine units, so both components are always even.

use std::fmt;

use crate::error::{DrawError, Result};
use crate::types::{Colour, Region};

/// The texture every directive chain starts from.
pub const BASE_TEXTURE: &str = "/assetmissing.png?crop=0;0;1;1?setcolor=ffffff";

/// Engine units per source pixel.
pub const UNITS_PER_PIXEL: i32 = 2;

/// Origin used to position directives.
///
/// `x`/`y` is the hand position in engine space, where y grows upward.
/// `height` is the source image height, used to flip image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
    pub height: u32,
}

impl Anchor {
    pub const fn new(x: i32, y: i32, height: u32) -> Self {
        Self { x, y, height }
    }

    /// Offset of a region's bottom-left corner, in half-pixel units.
    ///
    /// Fails when either component does not fit in an `i32`.
    pub fn offset(&self, region: &Region, scale: u32) -> Result<(i32, i32)> {
        let scale = i64::from(scale.max(1));
        let left = i64::from(region.x) * scale;
        let bottom =
            (i64::from(self.height) - i64::from(region.y) - i64::from(region.height)) * scale;

        let units = |pixels: i64, hand: i32| {
            (pixels - i64::from(hand))
                .checked_mul(i64::from(UNITS_PER_PIXEL))
                .and_then(|v| i32::try_from(v).ok())
        };

        match (units(left, self.x), units(bottom, self.y)) {
            (Some(dx), Some(dy)) => Ok((dx, dy)),
            _ => Err(DrawError::HandOffset {
                x: self.x,
                y: self.y,
            }),
        }
    }
}

/// Per-directive switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveFlags {
    /// Fade the region's edge into transparency.
    pub fade: bool,
    /// Integer upscale factor applied to size and position.
    pub scale: u32,
}

impl Default for DirectiveFlags {
    fn default() -> Self {
        Self {
            fade: false,
            scale: 1,
        }
    }
}

/// One encoded compositing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub region: Region,
    pub offset: (i32, i32),
    pub flags: DirectiveFlags,
}

impl Directive {
    /// Target colour, or `None` when the base texture passes through as is.
    pub fn recolour(&self) -> Option<Colour> {
        (self.region.colour != Colour::WHITE).then_some(self.region.colour)
    }

    /// Drawn size in source pixels after scaling.
    pub fn size(&self) -> (u32, u32) {
        let scale = self.flags.scale.max(1);
        (self.region.width * scale, self.region.height * scale)
    }

}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.size();
        write!(f, "?scalenearest={};{}", w, h)?;
        if let Some(colour) = self.recolour() {
            write!(f, "?replace=ffffff;{}", colour)?;
        }
        write!(f, "?offset={};{}", self.offset.0, self.offset.1)?;
        if self.flags.fade {
            write!(f, "?border=1;{}00;00000000", self.region.colour.rgb_hex())?;
        }
        Ok(())
    }
}

/// Encode a region relative to `anchor`.
pub fn encode(region: &Region, anchor: &Anchor, flags: DirectiveFlags) -> Result<Directive> {
    Ok(Directive {
        region: *region,
        offset: anchor.offset(region, flags.scale)?,
        flags,
    })
}

/// Concatenate directives into one chain.
pub fn chain<'a>(directives: impl IntoIterator<Item = &'a Directive>) -> String {
    directives.into_iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magenta() -> Colour {
        Colour::rgb(255, 0, 255)
    }

    #[test]
    fn test_single_pixel_at_origin() {
        let region = Region::new(0, 0, 1, 1, magenta());
        let d = encode(&region, &Anchor::new(0, 0, 1), DirectiveFlags::default()).unwrap();

        assert_eq!(d.offset, (0, 0));
        assert_eq!(d.to_string(), "?scalenearest=1;1?replace=ffffff;ff00ff?offset=0;0");
    }

    #[test]
    fn test_rows_are_flipped() {
        // Top row of a 4 pixel tall image sits 3 pixels above the bottom.
        let region = Region::new(2, 0, 3, 1, magenta());
        let d = encode(&region, &Anchor::new(0, 0, 4), DirectiveFlags::default()).unwrap();
        assert_eq!(d.offset, (4, 6));
    }

    #[test]
    fn test_negative_hand_offset() {
        let region = Region::new(0, 0, 1, 1, magenta());
        let d = encode(&region, &Anchor::new(-3, 5, 1), DirectiveFlags::default()).unwrap();
        assert_eq!(d.offset, (6, -10));
        assert!(d.to_string().ends_with("?offset=6;-10"));
    }

    #[test]
    fn test_white_passes_through() {
        let region = Region::new(0, 0, 2, 2, Colour::WHITE);
        let d = encode(&region, &Anchor::new(0, 0, 2), DirectiveFlags::default()).unwrap();

        assert_eq!(d.recolour(), None);
        assert_eq!(d.to_string(), "?scalenearest=2;2?offset=0;0");
    }

    #[test]
    fn test_translucent_white_is_recoloured() {
        let region = Region::new(0, 0, 1, 1, Colour::FILLER);
        let d = encode(&region, &Anchor::new(0, 0, 1), DirectiveFlags::default()).unwrap();
        assert_eq!(d.to_string(), "?scalenearest=1;1?replace=ffffff;ffffff01?offset=0;0");
    }

    #[test]
    fn test_fade_and_scale() {
        let region = Region::new(1, 0, 1, 1, Colour::new(16, 32, 48, 128));
        let flags = DirectiveFlags {
            fade: true,
            scale: 2,
        };
        let d = encode(&region, &Anchor::new(0, 0, 1), flags).unwrap();

        assert_eq!(
            d.to_string(),
            "?scalenearest=2;2?replace=ffffff;10203080?offset=4;0?border=1;10203000;00000000"
        );
    }

    #[test]
    fn test_chain() {
        let anchor = Anchor::new(0, 0, 1);
        let a = encode(&Region::new(0, 0, 1, 1, magenta()), &anchor, DirectiveFlags::default()).unwrap();
        let b = encode(&Region::new(1, 0, 1, 1, Colour::WHITE), &anchor, DirectiveFlags::default()).unwrap();

        assert_eq!(
            chain([&a, &b]),
            "?scalenearest=1;1?replace=ffffff;ff00ff?offset=0;0?scalenearest=1;1?offset=2;0"
        );
    }

    #[test]
    fn test_out_of_range_hand_is_an_error() {
        let region = Region::new(0, 0, 1, 1, magenta());

        for anchor in [
            Anchor::new(i32::MIN, 0, 1),
            Anchor::new(1_500_000_000, 0, 1),
            Anchor::new(0, i32::MAX, 1),
        ] {
            let err = encode(&region, &anchor, DirectiveFlags::default()).unwrap_err();
            assert!(matches!(err, DrawError::HandOffset { .. }));
        }

        // Largest hand that still fits.
        let d = encode(&region, &Anchor::new(-(i32::MAX / 2), 0, 1), DirectiveFlags::default())
            .unwrap();
        assert_eq!(d.offset, ((i32::MAX / 2) * 2, 0));
    }
}
