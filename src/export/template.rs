//! Template exporter - binds drawables into a caller-supplied skeleton.
//!
//! Templates are JSON documents. Placeholders live inside JSON strings:
//!
//! | token            | exact string becomes              | inside text becomes |
//! |------------------|-----------------------------------|---------------------|
//! | `{{directives}}` | image string of all cells         | same                |
//! | `{{drawables}}`  | array of `{"image": ...}` objects | compact JSON array  |
//! | `{{width}}`      | number                            | digits              |
//! | `{{height}}`     | number                            | digits              |
//! | `{{group}}`      | string, or `null` when absent     | group or nothing    |
//! | `{{icon}}`       | inventory icon image string       | same                |
//!
//! Any other `{{...}}` sequence is left untouched.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::{DrawError, Result};
use crate::render::DrawablesOutput;

use super::{icon_image, image_string, render_document, Exporter};

/// A recognized placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Directives,
    Drawables,
    Width,
    Height,
    Group,
    Icon,
}

impl Token {
    pub const ALL: [Token; 6] = [
        Token::Directives,
        Token::Drawables,
        Token::Width,
        Token::Height,
        Token::Group,
        Token::Icon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Token::Directives => "directives",
            Token::Drawables => "drawables",
            Token::Width => "width",
            Token::Height => "height",
            Token::Group => "group",
            Token::Icon => "icon",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Token::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// A validated template document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExporterTemplate {
    name: String,
    document: Value,
}

impl ExporterTemplate {
    /// Parse template text, naming the offending content on failure.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let document = serde_json::from_str(text).map_err(|e| {
            let offending = text
                .lines()
                .nth(e.line().saturating_sub(1))
                .map(str::trim)
                .filter(|line| !line.is_empty());
            DrawError::Template {
                name: name.clone(),
                message: e.to_string(),
                help: offending.map(|line| format!("Offending content: {}", line)),
            }
        })?;

        Ok(Self { name, document })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Check whether the template refers to a token anywhere.
    pub fn uses(&self, token: Token) -> bool {
        fn walk(value: &Value, token: Token) -> bool {
            match value {
                Value::String(s) => tokens_in(s).any(|t| t == token),
                Value::Array(items) => items.iter().any(|v| walk(v, token)),
                Value::Object(map) => map.values().any(|v| walk(v, token)),
                _ => false,
            }
        }
        walk(&self.document, token)
    }
}

/// Named template texts, supplied by whoever owns storage.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: BTreeMap<String, String>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Parse the named template.
    pub fn get(&self, name: &str) -> Result<ExporterTemplate> {
        let text = self.templates.get(name).ok_or_else(|| DrawError::Argument {
            message: format!("Could not load the template '{}'", name),
            help: Some(format!(
                "Available templates: {}",
                self.names().collect::<Vec<_>>().join(", ")
            )),
        })?;
        ExporterTemplate::parse(name, text)
    }
}

/// Exports an output through a template.
pub struct TemplateExporter<'a> {
    output: &'a DrawablesOutput,
    template: &'a ExporterTemplate,
}

impl<'a> TemplateExporter<'a> {
    pub fn new(output: &'a DrawablesOutput, template: &'a ExporterTemplate) -> Self {
        Self { output, template }
    }
}

impl Exporter for TemplateExporter<'_> {
    fn item_name(&self) -> Option<String> {
        self.template
            .document()
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn descriptor(&self, group: Option<&str>, include_icon: bool) -> Result<Value> {
        let icon = if self.template.uses(Token::Icon) {
            if !include_icon {
                return Err(DrawError::Argument {
                    message: format!(
                        "template '{}' references {{{{icon}}}} but no inventory icon was generated",
                        self.template.name()
                    ),
                    help: Some("Enable the inventory icon option".to_string()),
                });
            }
            Some(icon_image(self.output)?)
        } else {
            None
        };

        let values = TokenValues {
            output: self.output,
            group,
            icon,
        };
        values.substitute(self.template.document())
    }
}

/// Resolved values for one substitution pass.
struct TokenValues<'a> {
    output: &'a DrawablesOutput,
    group: Option<&'a str>,
    icon: Option<String>,
}

impl TokenValues<'_> {
    fn substitute(&self, value: &Value) -> Result<Value> {
        Ok(match value {
            Value::String(s) => self.substitute_string(s)?,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|v| self.substitute(v))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| -> Result<(String, Value)> {
                        Ok((k.clone(), self.substitute(v)?))
                    })
                    .collect::<Result<_>>()?,
            ),
            other => other.clone(),
        })
    }

    fn substitute_string(&self, s: &str) -> Result<Value> {
        if let Some(token) = exact_token(s) {
            return self.typed(token);
        }

        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => match Token::from_name(&after[..end]) {
                    Some(token) => {
                        out.push_str(&self.text(token)?);
                        rest = &after[end + 2..];
                    }
                    None => {
                        out.push_str("{{");
                        rest = after;
                    }
                },
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);

        Ok(Value::String(out))
    }

    fn typed(&self, token: Token) -> Result<Value> {
        Ok(match token {
            Token::Width => json!(self.output.width()),
            Token::Height => json!(self.output.height()),
            Token::Group => self.group.map_or(Value::Null, |g| json!(g)),
            Token::Drawables => self.drawables(),
            Token::Directives | Token::Icon => Value::String(self.text(token)?),
        })
    }

    fn text(&self, token: Token) -> Result<String> {
        Ok(match token {
            Token::Directives => image_string(&self.output.text()),
            Token::Drawables => render_document(&self.drawables(), false)?,
            Token::Width => self.output.width().to_string(),
            Token::Height => self.output.height().to_string(),
            Token::Group => self.group.unwrap_or_default().to_string(),
            Token::Icon => self.icon.clone().unwrap_or_default(),
        })
    }

    fn drawables(&self) -> Value {
        Value::Array(
            self.output
                .drawables()
                .map(|d| json!({ "image": image_string(&d.text()) }))
                .collect(),
        )
    }
}

/// The token a string consists of entirely, if any.
fn exact_token(s: &str) -> Option<Token> {
    s.strip_prefix("{{")
        .and_then(|inner| inner.strip_suffix("}}"))
        .and_then(Token::from_name)
}

/// Recognized tokens appearing in a string.
fn tokens_in(s: &str) -> impl Iterator<Item = Token> + '_ {
    s.split("{{")
        .skip(1)
        .filter_map(|chunk| chunk.split_once("}}"))
        .filter_map(|(name, _)| Token::from_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{generate, GenerateOptions, BASE_TEXTURE};
    use crate::types::{Colour, PixelGrid};
    use pretty_assertions::assert_eq;

    fn output() -> DrawablesOutput {
        let grid = PixelGrid::filled(3, 2, Colour::rgb(255, 0, 255));
        generate(&grid, &GenerateOptions::new().with_replace_blank(true)).unwrap()
    }

    fn export(text: &str, group: Option<&str>, include_icon: bool) -> Result<Value> {
        let output = output();
        let template = ExporterTemplate::parse("test.json", text)?;
        TemplateExporter::new(&output, &template).descriptor(group, include_icon)
    }

    #[test]
    fn test_unrecognized_tokens_pass_through() {
        let text = r#"{"name": "{{item}}", "parameters": {"a": ["{{x}} and {{y}}", 3, null]}}"#;
        let doc = export(text, None, false).unwrap();
        let original: Value = serde_json::from_str(text).unwrap();
        assert_eq!(doc, original);
    }

    #[test]
    fn test_typed_tokens() {
        let text = r#"{
            "name": "staff",
            "parameters": {
                "size": ["{{width}}", "{{height}}"],
                "group": "{{group}}",
                "drawables": "{{drawables}}"
            }
        }"#;

        let doc = export(text, None, false).unwrap();
        assert_eq!(doc["parameters"]["size"], json!([3, 2]));
        assert_eq!(doc["parameters"]["group"], Value::Null);

        let drawables = doc["parameters"]["drawables"].as_array().unwrap();
        assert_eq!(drawables.len(), 1);
        assert!(drawables[0]["image"].as_str().unwrap().starts_with(BASE_TEXTURE));

        let doc = export(text, Some("weapon"), false).unwrap();
        assert_eq!(doc["parameters"]["group"], "weapon");
    }

    #[test]
    fn test_inline_tokens() {
        let text = r#"{"name": "x", "description": "{{width}}x{{height}} in {{group}}{{nope}}"}"#;
        let doc = export(text, Some("hand"), false).unwrap();
        assert_eq!(doc["description"], "3x2 in hand{{nope}}");
    }

    #[test]
    fn test_directives_token() {
        let doc = export(r#"{"image": "{{directives}}"}"#, None, false).unwrap();
        let image = doc["image"].as_str().unwrap();
        assert_eq!(
            image,
            format!("{}{}", BASE_TEXTURE, output().text())
        );
    }

    #[test]
    fn test_icon_requires_generation() {
        let text = r#"{"name": "x", "parameters": {"inventoryIcon": "{{icon}}"}}"#;

        let err = export(text, None, false).unwrap_err();
        assert!(matches!(err, DrawError::Argument { .. }));

        let doc = export(text, None, true).unwrap();
        assert!(doc["parameters"]["inventoryIcon"]
            .as_str()
            .unwrap()
            .starts_with(BASE_TEXTURE));
    }

    #[test]
    fn test_malformed_template_names_content() {
        let err = ExporterTemplate::parse("broken.json", "{\n  \"name\": oops\n}").unwrap_err();
        match err {
            DrawError::Template { name, help, .. } => {
                assert_eq!(name, "broken.json");
                assert_eq!(help.as_deref(), Some("Offending content: \"name\": oops"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_command_from_template() {
        let output = output();
        let template = ExporterTemplate::parse(
            "t.json",
            r#"{"name": "mything", "count": 2, "parameters": {"w": "{{width}}"}}"#,
        )
        .unwrap();

        let command = TemplateExporter::new(&output, &template)
            .command(None, false)
            .unwrap();
        assert_eq!(command, r#"/spawnitem mything 2 '{"w":3}'"#);

        let nameless = ExporterTemplate::parse("n.json", r#"{"parameters": {}}"#).unwrap();
        let err = TemplateExporter::new(&output, &nameless)
            .command(None, false)
            .unwrap_err();
        assert!(matches!(err, DrawError::Argument { .. }));
    }

    #[test]
    fn test_template_set() {
        let mut set = TemplateSet::new();
        set.insert("b.json", "{}");
        set.insert("a.json", "[]");

        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a.json", "b.json"]);
        assert!(set.get("a.json").is_ok());
        assert!(matches!(set.get("c.json"), Err(DrawError::Argument { .. })));
    }

    #[test]
    fn test_uses() {
        let template = ExporterTemplate::parse("t", r#"{"a": ["x {{icon}}"]}"#).unwrap();
        assert!(template.uses(Token::Icon));
        assert!(!template.uses(Token::Width));
    }
}
