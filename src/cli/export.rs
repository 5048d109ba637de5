//! Export command implementation.
//!
//! Generates per-cell drawables and prints the item descriptor to stdout.

use clap::Args;

use crate::config::Manifest;
use crate::error::Result;
use crate::export::render_document;
use crate::output::Printer;

use super::{generate_for_export, ImageArgs, ItemArgs};

/// Print an item descriptor for an image
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    #[command(flatten)]
    pub item: ItemArgs,

    /// Print the descriptor on one line
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: ExportArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let text = export_text(&args.image, &args.item, args.compact, manifest, printer)?;
    println!("{}", text);
    Ok(())
}

/// Descriptor text for one image, shared with `watch`.
pub(crate) fn export_text(
    image: &ImageArgs,
    item: &ItemArgs,
    compact: bool,
    manifest: &Manifest,
    printer: &Printer,
) -> Result<String> {
    let output = generate_for_export(image, manifest, printer)?;
    let (name, document) = item.descriptor(&output, manifest)?;

    if let Some(name) = name {
        printer.success("Exported", &name);
    }

    render_document(&document, manifest.pretty && !compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 255, 255]));
        img.save(path).unwrap();
    }

    fn image_args(path: &Path) -> ImageArgs {
        ImageArgs {
            image: path.to_path_buf(),
            hand_x: None,
            hand_y: None,
            ignore: None,
            force: false,
        }
    }

    fn item_args() -> ItemArgs {
        ItemArgs {
            item: None,
            template: None,
            templates: None,
            weapon_group: false,
            inventory_icon: false,
        }
    }

    #[test]
    fn test_export_pistol() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gun.png");
        write_png(&path, 40, 4);

        let text = export_text(
            &image_args(&path),
            &item_args(),
            true,
            &Manifest::default(),
            &Printer::new(),
        )
        .unwrap();

        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["name"], "commonpistol");
        assert!(!text.contains('\n'));

        let parts = &doc["parameters"]["animationCustom"]["animatedParts"]["parts"];
        assert!(parts.get("drawable-0-0").is_some());
        assert!(parts.get("drawable-1-0").is_some());
    }

    #[test]
    fn test_export_through_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gun.png");
        write_png(&path, 2, 2);

        let templates = dir.path().join("templates");
        std::fs::create_dir(&templates).unwrap();
        std::fs::write(
            templates.join("bow.json"),
            r#"{"name": "bow", "parameters": {"size": ["{{width}}", "{{height}}"]}}"#,
        )
        .unwrap();

        let mut item = item_args();
        item.template = Some("bow.json".to_string());
        item.templates = Some(templates);

        let text = export_text(&image_args(&path), &item, true, &Manifest::default(), &Printer::new())
            .unwrap();
        assert_eq!(text, r#"{"name":"bow","parameters":{"size":[2,2]}}"#);
    }

    #[test]
    fn test_missing_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gun.png");
        write_png(&path, 2, 2);

        let mut item = item_args();
        item.template = Some("nope.json".to_string());
        item.templates = Some(dir.path().join("missing"));

        let result = export_text(&image_args(&path), &item, true, &Manifest::default(), &Printer::new());
        assert!(result.is_err());
    }
}
