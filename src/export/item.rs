//! Built-in item exporters.
//!
//! Each item kind reuses a stock weapon, blanks its stock animation parts
//! and adds one part per occupied drawable cell.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};

use crate::error::{DrawError, Result};
use crate::render::DrawablesOutput;

use super::{icon_image, image_string, Exporter};

/// The built-in item skeletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Pistol,
    Shortsword,
    TeslaStaff,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Pistol, ItemKind::Shortsword, ItemKind::TeslaStaff];

    /// Name used on the command line and in config files.
    pub fn slug(self) -> &'static str {
        match self {
            ItemKind::Pistol => "pistol",
            ItemKind::Shortsword => "shortsword",
            ItemKind::TeslaStaff => "tesla-staff",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Pistol => "Common Pistol",
            ItemKind::Shortsword => "Common Shortsword",
            ItemKind::TeslaStaff => "Tesla Staff",
        }
    }

    /// Item the descriptor spawns.
    pub fn item_name(self) -> &'static str {
        match self {
            ItemKind::Pistol => "commonpistol",
            ItemKind::Shortsword => "commonshortsword",
            ItemKind::TeslaStaff => "teslastaff",
        }
    }

    fn short_description(self) -> &'static str {
        match self {
            ItemKind::Pistol => "Drawable Pistol",
            ItemKind::Shortsword => "Drawable Shortsword",
            ItemKind::TeslaStaff => "Drawable Staff",
        }
    }

    fn rarity(self) -> &'static str {
        match self {
            ItemKind::Pistol | ItemKind::Shortsword => "Common",
            ItemKind::TeslaStaff => "Rare",
        }
    }

    /// Stock animation parts hidden so only the drawables show.
    fn hidden_parts(self) -> &'static [&'static str] {
        match self {
            ItemKind::Pistol => &["butt", "middle", "barrel"],
            ItemKind::Shortsword => &["blade", "handle"],
            ItemKind::TeslaStaff => &["staff", "stone"],
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ItemKind {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted || kind.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| DrawError::Argument {
                message: format!("Unknown item kind: {}", s),
                help: Some("Use pistol, shortsword or tesla-staff".to_string()),
            })
    }
}

/// Exports an output into one of the built-in item skeletons.
pub struct ItemExporter<'a> {
    output: &'a DrawablesOutput,
    kind: ItemKind,
}

impl<'a> ItemExporter<'a> {
    pub fn new(output: &'a DrawablesOutput, kind: ItemKind) -> Self {
        Self { output, kind }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    fn parts(&self, group: Option<&str>) -> Map<String, Value> {
        let mut parts = Map::new();

        for name in self.kind.hidden_parts() {
            parts.insert(name.to_string(), json!({ "properties": { "image": "" } }));
        }

        for (index, drawable) in self.output.drawables().enumerate() {
            let mut properties = Map::new();
            properties.insert("image".to_string(), json!(image_string(&drawable.text())));
            properties.insert("centered".to_string(), json!(false));
            properties.insert("zLevel".to_string(), json!(index + 1));
            if let Some(group) = group {
                properties.insert("transformationGroups".to_string(), json!([group]));
            }

            parts.insert(
                format!("drawable-{}-{}", drawable.column, drawable.row),
                json!({ "properties": properties }),
            );
        }

        parts
    }
}

impl Exporter for ItemExporter<'_> {
    fn item_name(&self) -> Option<String> {
        Some(self.kind.item_name().to_string())
    }

    fn descriptor(&self, group: Option<&str>, include_icon: bool) -> Result<Value> {
        let mut parameters = Map::new();
        parameters.insert("shortdescription".to_string(), json!(self.kind.short_description()));
        parameters.insert("rarity".to_string(), json!(self.kind.rarity()));
        parameters.insert(
            "animationCustom".to_string(),
            json!({ "animatedParts": { "parts": self.parts(group) } }),
        );

        if include_icon {
            parameters.insert("inventoryIcon".to_string(), json!(icon_image(self.output)?));
        }

        Ok(json!({
            "name": self.kind.item_name(),
            "count": 1,
            "parameters": parameters,
        }))
    }
}
