//! Exporters - bind generated drawables into item descriptors.
//!
//! Every exporter produces a JSON descriptor of the form
//! `{"name": ..., "count": ..., "parameters": {...}}`. The same document can
//! be flattened into a `/spawnitem` command.

mod item;
mod template;

pub use item::{ItemExporter, ItemKind};
pub use template::{ExporterTemplate, TemplateExporter, TemplateSet, Token};

use serde_json::Value;

use crate::error::{DrawError, Result};
use crate::render::{build_icon, DrawablesOutput, BASE_TEXTURE};

/// Something that can turn a generated output into an item.
pub trait Exporter {
    /// Name of the item the descriptor spawns, when known up front.
    fn item_name(&self) -> Option<String>;

    /// Build the item descriptor.
    ///
    /// `group` adds a transformation group to every drawable, and
    /// `include_icon` generates an inventory icon for the item.
    fn descriptor(&self, group: Option<&str>, include_icon: bool) -> Result<Value>;

    /// Build a spawn command for the same item. Always compact.
    fn command(&self, group: Option<&str>, include_icon: bool) -> Result<String> {
        spawn_command(&self.descriptor(group, include_icon)?)
    }
}

/// Serialize a document, pretty-printed or compact.
pub fn render_document(document: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    text.map_err(|e| DrawError::argument(format!("Could not serialize document: {}", e)))
}

/// Flatten a descriptor into `/spawnitem <name> <count> '<parameters>'`.
pub fn spawn_command(document: &Value) -> Result<String> {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| DrawError::Argument {
            message: "the descriptor has no item name".to_string(),
            help: Some("Add a string \"name\" field to the template".to_string()),
        })?;

    let count = document.get("count").and_then(Value::as_u64).unwrap_or(1);

    let parameters = match document.get("parameters") {
        Some(Value::Object(map)) => Value::Object(map.clone()),
        Some(Value::Null) | None => Value::Object(serde_json::Map::new()),
        Some(_) => {
            return Err(DrawError::argument(
                "the descriptor's \"parameters\" field must be an object",
            ))
        }
    };

    // The command wraps parameters in single quotes.
    let parameters = render_document(&parameters, false)?.replace('\'', "\\u0027");

    Ok(format!("/spawnitem {} {} '{}'", name, count, parameters))
}

/// Full image string for one chain.
pub fn image_string(chain: &str) -> String {
    format!("{}{}", BASE_TEXTURE, chain)
}

/// Inventory icon image for an output.
pub(crate) fn icon_image(output: &DrawablesOutput) -> Result<String> {
    Ok(image_string(&build_icon(output)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spawn_command() {
        let doc = json!({
            "name": "commonpistol",
            "count": 1,
            "parameters": { "rarity": "Common" }
        });
        assert_eq!(
            spawn_command(&doc).unwrap(),
            r#"/spawnitem commonpistol 1 '{"rarity":"Common"}'"#
        );
    }

    #[test]
    fn test_spawn_command_defaults() {
        let doc = json!({ "name": "thing" });
        assert_eq!(spawn_command(&doc).unwrap(), "/spawnitem thing 1 '{}'");
    }

    #[test]
    fn test_spawn_command_escapes_quotes() {
        let doc = json!({ "name": "thing", "parameters": { "description": "it's" } });
        assert_eq!(
            spawn_command(&doc).unwrap(),
            r#"/spawnitem thing 1 '{"description":"it\u0027s"}'"#
        );
    }

    #[test]
    fn test_spawn_command_needs_name() {
        let err = spawn_command(&json!({ "parameters": {} })).unwrap_err();
        assert!(matches!(err, DrawError::Argument { .. }));

        let err = spawn_command(&json!({ "name": "x", "parameters": [] })).unwrap_err();
        assert!(matches!(err, DrawError::Argument { .. }));
    }

    #[test]
    fn test_render_document() {
        let doc = json!({ "a": [1, 2] });
        assert_eq!(render_document(&doc, false).unwrap(), r#"{"a":[1,2]}"#);
        assert_eq!(
            render_document(&doc, true).unwrap(),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }
}
