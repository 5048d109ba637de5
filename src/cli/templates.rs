//! Templates command implementation.
//!
//! Lists the built-in item kinds and every template found on disk.

use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::config::Manifest;
use crate::error::{DrawError, Result};
use crate::export::{ItemKind, TemplateSet};
use crate::output::{display_path, plural, Printer};

/// List built-in item kinds and available templates
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Directory holding *.json templates
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

pub fn run(args: TemplatesArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    for kind in ItemKind::ALL {
        printer.info("Item", &format!("{} {}", kind.slug(), printer.dim(kind.label())));
    }

    let dir = args.templates.as_deref().unwrap_or(&manifest.templates);
    let set = load_templates(dir)?;

    for name in set.names() {
        // Listing still works when one template is broken.
        match set.get(name) {
            Ok(_) => printer.info("Template", name),
            Err(e) => printer.warning("Template", &format!("{} {}", name, printer.dim(&e.to_string()))),
        }
    }

    printer.status(
        "Found",
        &format!(
            "{} in {}",
            plural(set.len(), "template", "templates"),
            display_path(dir)
        ),
    );

    Ok(())
}

/// Read every `*.json` file directly inside `dir`, keyed by file name.
///
/// A missing directory yields an empty set.
pub fn load_templates(dir: &Path) -> Result<TemplateSet> {
    let mut set = TemplateSet::new();
    if !dir.is_dir() {
        log::debug!("no template directory at {}", dir.display());
        return Ok(set);
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let text = std::fs::read_to_string(path).map_err(|e| DrawError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read template: {}", e),
        })?;
        set.insert(name, text);
    }

    log::debug!("loaded {} template(s) from {}", set.len(), dir.display());
    Ok(set)
}
