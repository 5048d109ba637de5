pub mod command;
pub mod completions;
pub mod export;
pub mod icon;
pub mod single;
pub mod templates;
pub mod watch;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::Manifest;
use crate::error::{DrawError, Result};
use crate::export::{Exporter, ItemExporter, ItemKind, TemplateExporter, TemplateSet};
use crate::output::{display_path, Printer};
use crate::render::{generate, DrawablesOutput, GenerateOptions};
use crate::types::PixelGrid;

/// drawables - Encode images as directive chains on a blank texture
#[derive(Parser, Debug)]
#[command(name = "drawables")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Manifest with default options (default: ./drawables.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an item descriptor for an image
    Export(export::ExportArgs),

    /// Print a /spawnitem command for an image
    Command(command::CommandArgs),

    /// Print one directive chain for the whole image
    Single(single::SingleArgs),

    /// Print inventory icon directives for an image
    Icon(icon::IconArgs),

    /// List built-in item kinds and available templates
    Templates(templates::TemplatesArgs),

    /// Re-export an image whenever it changes
    Watch(watch::WatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Image selection and generation options shared by every image command.
#[derive(Args, Debug, Clone)]
pub struct ImageArgs {
    /// Image to convert
    pub image: PathBuf,

    /// Hand position x, in pixels from the left edge
    #[arg(long, allow_negative_numbers = true)]
    pub hand_x: Option<i32>,

    /// Hand position y, in pixels from the bottom edge
    #[arg(long, allow_negative_numbers = true)]
    pub hand_y: Option<i32>,

    /// Colour to leave out (RRGGBB, or RRGGBBAA to match alpha too)
    #[arg(long)]
    pub ignore: Option<String>,

    /// Continue even when the image is larger than recommended
    #[arg(long)]
    pub force: bool,
}

impl ImageArgs {
    /// Hand position, flags first then manifest.
    pub fn hand(&self, manifest: &Manifest) -> (i32, i32) {
        (
            self.hand_x.unwrap_or(manifest.hand[0]),
            self.hand_y.unwrap_or(manifest.hand[1]),
        )
    }

    pub fn ignore<'a>(&'a self, manifest: &'a Manifest) -> Option<&'a str> {
        self.ignore.as_deref().or(manifest.ignore.as_deref())
    }

    /// Generation options with the given blank policy.
    pub fn options(&self, manifest: &Manifest, replace_blank: bool) -> Result<GenerateOptions> {
        let (hand_x, hand_y) = self.hand(manifest);
        GenerateOptions::new()
            .with_hand(hand_x, hand_y)
            .with_replace_white(true)
            .with_replace_blank(replace_blank)
            .with_ignore_hex(self.ignore(manifest))
    }

    /// Open the image and apply the size guard.
    pub fn load(&self, printer: &Printer) -> Result<PixelGrid> {
        let grid = PixelGrid::open(&self.image)?;

        if let Some(warning) = grid.size_warning() {
            if !self.force {
                return Err(DrawError::Policy {
                    message: warning.to_string(),
                    help: Some(
                        "Large images generate very long directives; pass --force to continue"
                            .to_string(),
                    ),
                });
            }
            printer.warning("Warning", &warning.to_string());
        }

        Ok(grid)
    }
}

/// Which exporter to use and how, shared by export, command and watch.
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    /// Built-in item kind (pistol, shortsword, tesla-staff)
    #[arg(long, conflicts_with = "template")]
    pub item: Option<String>,

    /// Template name from the templates directory
    #[arg(long)]
    pub template: Option<String>,

    /// Directory holding *.json templates
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Tag every drawable with the weapon transformation group
    #[arg(long)]
    pub weapon_group: bool,

    /// Generate an inventory icon
    #[arg(long)]
    pub inventory_icon: bool,
}

/// A resolved exporter choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Item(ItemKind),
    Template(String),
}

impl ItemArgs {
    pub fn templates_dir<'a>(&'a self, manifest: &'a Manifest) -> &'a Path {
        self.templates.as_deref().unwrap_or(&manifest.templates)
    }

    pub fn group(&self, manifest: &Manifest) -> Option<&'static str> {
        (self.weapon_group || manifest.weapon_group).then_some("weapon")
    }

    pub fn include_icon(&self, manifest: &Manifest) -> bool {
        self.inventory_icon || manifest.inventory_icon
    }

    /// Resolve `--item`/`--template`, falling back to the manifest's item
    /// and then the pistol. A manifest item that is not a built-in kind
    /// names a template.
    pub fn target(&self, manifest: &Manifest) -> Result<ExportTarget> {
        if let Some(name) = &self.template {
            return Ok(ExportTarget::Template(name.clone()));
        }
        if let Some(item) = &self.item {
            return item.parse().map(ExportTarget::Item);
        }
        match &manifest.item {
            Some(item) => Ok(item
                .parse()
                .map(ExportTarget::Item)
                .unwrap_or_else(|_| ExportTarget::Template(item.clone()))),
            None => Ok(ExportTarget::Item(ItemKind::Pistol)),
        }
    }

    /// Descriptor for `output` through the resolved exporter.
    pub fn descriptor(
        &self,
        output: &DrawablesOutput,
        manifest: &Manifest,
    ) -> Result<(Option<String>, serde_json::Value)> {
        let group = self.group(manifest);
        let include_icon = self.include_icon(manifest);

        match self.target(manifest)? {
            ExportTarget::Item(kind) => {
                let exporter = ItemExporter::new(output, kind);
                Ok((exporter.item_name(), exporter.descriptor(group, include_icon)?))
            }
            ExportTarget::Template(name) => {
                let set = templates::load_templates(self.templates_dir(manifest))?;
                let template = find_template(&set, &name, self.templates_dir(manifest))?;
                let exporter = TemplateExporter::new(output, &template);
                Ok((exporter.item_name(), exporter.descriptor(group, include_icon)?))
            }
        }
    }
}

fn find_template(
    set: &TemplateSet,
    name: &str,
    dir: &Path,
) -> Result<crate::export::ExporterTemplate> {
    if set.is_empty() {
        return Err(DrawError::Argument {
            message: format!("Could not load the template '{}'", name),
            help: Some(format!("No templates found in {}", display_path(dir))),
        });
    }
    set.get(name)
}

/// Load an image and generate its per-cell drawables for exporting.
pub fn generate_for_export(
    args: &ImageArgs,
    manifest: &Manifest,
    printer: &Printer,
) -> Result<DrawablesOutput> {
    let grid = args.load(printer)?;
    let output = generate(&grid, &args.options(manifest, true)?)?;

    printer.status(
        "Generated",
        &format!(
            "{} ({}x{}, {})",
            display_path(&args.image),
            grid.width(),
            grid.height(),
            crate::output::plural(output.drawables().count(), "drawable", "drawables")
        ),
    );

    Ok(output)
}
