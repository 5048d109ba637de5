//! Command command implementation.
//!
//! Same export as `export`, flattened into a `/spawnitem` line.

use clap::Args;

use crate::config::Manifest;
use crate::error::Result;
use crate::export::spawn_command;
use crate::output::Printer;

use super::{generate_for_export, ImageArgs, ItemArgs};

/// Print a /spawnitem command for an image
#[derive(Args, Debug)]
pub struct CommandArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    #[command(flatten)]
    pub item: ItemArgs,
}

pub fn run(args: CommandArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let output = generate_for_export(&args.image, manifest, printer)?;
    let (_, document) = args.item.descriptor(&output, manifest)?;
    let command = spawn_command(&document)?;

    printer.info("Command", &format!("{} bytes", command.len()));
    println!("{}", command);

    Ok(())
}
