//! Project manifest (drawables.yaml) parsing.
//!
//! The manifest holds defaults for the command line: hand position,
//! ignore colour, merge limits and where templates live. Flags passed on
//! the command line always win.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DrawError, Result};
use crate::render::DEFAULT_MAX_SOURCE_SIZE;

/// Default manifest file name, looked up in the working directory.
pub const MANIFEST_FILE: &str = "drawables.yaml";

/// Defaults loaded from drawables.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Hand position as `[x, y]`.
    pub hand: [i32; 2],

    /// Ignore colour as RRGGBB or RRGGBBAA.
    pub ignore: Option<String>,

    /// Per-axis source span limit for merged output.
    pub max_source_size: u32,

    /// Directory holding `*.json` item templates.
    pub templates: PathBuf,

    /// Default item kind or template name.
    pub item: Option<String>,

    /// Tag drawables with the weapon transformation group.
    pub weapon_group: bool,

    /// Generate an inventory icon when exporting.
    pub inventory_icon: bool,

    /// Pretty-print exported documents.
    pub pretty: bool,
}

fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            hand: [0, 0],
            ignore: None,
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
            templates: default_templates(),
            item: None,
            weapon_group: false,
            inventory_icon: false,
            pretty: true,
        }
    }
}

impl Manifest {
    /// Load manifest from a drawables.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DrawError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| DrawError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILE)),
        })
    }

    /// Use an explicit manifest, or drawables.yaml in `dir` when present.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = dir.join(MANIFEST_FILE);
        if default_path.is_file() {
            log::debug!("loading manifest from {}", default_path.display());
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}
