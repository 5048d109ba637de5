//! Single command implementation.
//!
//! Prints the whole image as one directive chain for a single texture.
//! Plain and fade output go through the merger; scaled output is printed as
//! its one cell.

use clap::Args;

use crate::config::Manifest;
use crate::error::Result;
use crate::export::image_string;
use crate::output::{display_path, Printer};
use crate::render::{
    ensure_chain_length, generate, generate_scaled, merge, DrawMode, Drawable, GenerateOptions,
    MAX_CHAIN_LENGTH,
};
use crate::types::PixelGrid;

use super::ImageArgs;

/// Print one directive chain for the whole image
#[derive(Args, Debug)]
pub struct SingleArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    /// Largest width or height the merged texture may span
    #[arg(long)]
    pub max_size: Option<u32>,

    /// Fade regions over a transparent canvas
    #[arg(long)]
    pub fade: bool,

    /// Draw every pixel at double size
    #[arg(long)]
    pub scale: bool,
}

pub fn run(args: SingleArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let mode = DrawMode::from_flags(args.scale, args.fade)?;
    let grid = args.image.load(printer)?;
    let options = args.image.options(manifest, mode.replace_blank())?;
    let max_size = args.max_size.unwrap_or(manifest.max_source_size);

    let (text, count) = single_texture(&grid, &options, mode, max_size)?;

    printer.status(
        "Merged",
        &format!(
            "{} ({} directives, {} bytes)",
            display_path(&args.image.image),
            count,
            text.len()
        ),
    );
    println!("{}", image_string(&text));

    Ok(())
}

/// One chain for the whole image, and the number of directives in it.
///
/// Scaled output is already a single cell, so it skips the merger and its
/// span limit; only the chain length is checked.
pub(crate) fn single_texture(
    grid: &PixelGrid,
    options: &GenerateOptions,
    mode: DrawMode,
    max_size: u32,
) -> Result<(String, usize)> {
    match mode {
        DrawMode::Scale => {
            let output = generate_scaled(grid, options)?;
            let text = output.get(0, 0).map(Drawable::text).unwrap_or_default();
            ensure_chain_length(&text, MAX_CHAIN_LENGTH)?;
            Ok((text, output.directive_count()))
        }
        DrawMode::Plain | DrawMode::Fade => {
            let output = generate(grid, options)?;
            let text = merge(&output, max_size, mode == DrawMode::Fade)?;
            Ok((text, output.directive_count() + 1))
        }
    }
}
