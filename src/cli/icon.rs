//! Icon command implementation.
//!
//! Inventory icons keep white pixels as pass-through and sit at the origin.

use clap::Args;

use crate::config::Manifest;
use crate::error::Result;
use crate::export::image_string;
use crate::output::{display_path, Printer};
use crate::render::{build_icon, generate, GenerateOptions};

use super::ImageArgs;

/// Print inventory icon directives for an image
#[derive(Args, Debug)]
pub struct IconArgs {
    #[command(flatten)]
    pub image: ImageArgs,
}

pub fn run(args: IconArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let grid = args.image.load(printer)?;
    let icon = build_icon(&generate(&grid, &icon_options(&args.image, manifest)?)?)?;

    printer.status("Icon", &display_path(&args.image.image));
    println!("{}", image_string(&icon));

    Ok(())
}

/// Generation options for an icon. The hand position is irrelevant.
fn icon_options(args: &ImageArgs, manifest: &Manifest) -> Result<GenerateOptions> {
    Ok(args
        .options(manifest, false)?
        .with_hand(0, 0)
        .with_replace_white(false))
}
