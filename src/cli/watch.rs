//! Watch command implementation.
//!
//! Watches the image's parent directory, so editors that save by writing a
//! temp file and renaming it are still seen, and re-exports on every change.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::config::Manifest;
use crate::error::{DrawError, Result};
use crate::export::spawn_command;
use crate::output::{display_path, Printer};

use super::export::export_text;
use super::{generate_for_export, ImageArgs, ItemArgs};

/// Editors often emit several events per save.
const SETTLE: Duration = Duration::from_millis(200);

/// Re-export an image whenever it changes
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    #[command(flatten)]
    pub item: ItemArgs,

    /// Print /spawnitem commands instead of descriptors
    #[arg(long)]
    pub command: bool,

    /// Print descriptors on one line
    #[arg(long)]
    pub compact: bool,
}

/// What a batch of file-system events means for the watched image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Updated,
    Removed,
}

pub fn run(args: WatchArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let target = canonical(&args.image.image);
    let dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| watch_error(&dir, e))?;
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|e| watch_error(&dir, e))?;

    log::info!("watching {}", target.display());
    printer.info("Watching", &display_path(&args.image.image));

    if target.is_file() {
        emit(&args, manifest, printer);
    }

    while let Ok(first) = rx.recv() {
        let mut batch = vec![first];
        while let Ok(next) = rx.recv_timeout(SETTLE) {
            batch.push(next);
        }

        let events: Vec<Event> = batch
            .into_iter()
            .filter_map(|result| match result {
                Ok(event) => Some(event),
                Err(e) => {
                    printer.warning("Watch", &e.to_string());
                    None
                }
            })
            .collect();

        match classify(&events, &target) {
            Some(Change::Updated) => emit(&args, manifest, printer),
            Some(Change::Removed) => {
                printer.warning("Removed", &display_path(&args.image.image));
            }
            None => {}
        }
    }

    Ok(())
}

/// Decide whether any event touched `target`. The last relevant event wins.
pub fn classify(events: &[Event], target: &Path) -> Option<Change> {
    events
        .iter()
        .filter(|event| event.paths.iter().any(|p| p == target || canonical(p) == target))
        .filter_map(|event| match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => Some(Change::Updated),
            EventKind::Remove(_) => Some(Change::Removed),
            _ => None,
        })
        .last()
}

/// One export pass. Failures are reported and the watch continues.
fn emit(args: &WatchArgs, manifest: &Manifest, printer: &Printer) {
    let result = if args.command {
        generate_for_export(&args.image, manifest, printer)
            .and_then(|output| args.item.descriptor(&output, manifest))
            .and_then(|(_, document)| spawn_command(&document))
    } else {
        export_text(&args.image, &args.item, args.compact, manifest, printer)
    };

    match result {
        Ok(text) => println!("{}", text),
        Err(e) => printer.error("Error", &e.to_string()),
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn watch_error(dir: &Path, e: notify::Error) -> DrawError {
    DrawError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to watch directory: {}", e),
    }
}
