//! Drawables engine.
//!
//! Turns decoded pixels into directive chains: regions are found by the
//! optimizer, encoded by the directive codec, laid out by the generator,
//! and optionally collapsed by the merger or pinned as an inventory icon.

mod directive;
mod generate;
mod icon;
mod merge;
mod optimize;

pub use directive::{chain, encode, Anchor, Directive, DirectiveFlags, BASE_TEXTURE, UNITS_PER_PIXEL};
pub use generate::{
    generate, generate_image, generate_scaled, DrawMode, Drawable, DrawablesOutput, GenerateOptions,
    SCALED_FACTOR, TILE_HEIGHT, TILE_WIDTH,
};
pub use icon::{build_icon, ICON_SOURCE_SIZE};
pub use merge::{ensure_chain_length, merge, merge_with, MergeOptions, DEFAULT_MAX_SOURCE_SIZE, MAX_CHAIN_LENGTH};
pub use optimize::{optimize, optimize_within};
