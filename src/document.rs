//! Structured documents (JSON/YAML) as untyped trees.
//!
//! Each format keeps its own value tree so scalars and keys the mapping never
//! addresses are written back as they were read: JSON numbers keep their
//! literal text and YAML keeps special floats and non-string keys. Dotted-path
//! edits go through [`Tree`], which both trees implement.
use crate::files::read_optional_text;
use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

/// On-disk format of a structured target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yml" | "yaml") => Ok(Self::Yaml),
            _ => Err(anyhow!(
                "unsupported structured format: {} (expected .json, .yml or .yaml)",
                path.display()
            )),
        }
    }
}

/// A parsed structured file in the tree of its own format.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Json(JsonValue),
    #[cfg(feature = "yaml")]
    Yaml(serde_yaml::Value),
}

impl Document {
    /// Set `dotted` to a string value. See [`set_path`].
    pub fn set_text(&mut self, dotted: &str, value: String) -> Result<()> {
        match self {
            Self::Json(root) => set_path(root, dotted, JsonValue::String(value)),
            #[cfg(feature = "yaml")]
            Self::Yaml(root) => set_path(root, dotted, serde_yaml::Value::String(value)),
        }
    }

    /// Text of the scalar at `dotted` when it counts as populated.
    pub fn text_at(&self, dotted: &str) -> Option<String> {
        match self {
            Self::Json(root) => get_path(root, dotted)?.populated_text(),
            #[cfg(feature = "yaml")]
            Self::Yaml(root) => get_path(root, dotted)?.populated_text(),
        }
    }

    /// Serialize in the document's own format. JSON is 2-space indented with a
    /// trailing newline.
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Json(root) => {
                let mut text = serde_json::to_string_pretty(root).context("serialize JSON")?;
                text.push('\n');
                Ok(text)
            }
            #[cfg(feature = "yaml")]
            Self::Yaml(root) => serde_yaml::to_string(root).context("serialize YAML"),
        }
    }
}

/// Load a document, treating a missing file as an empty mapping.
pub fn load_document(path: &Path, format: Format) -> Result<Document> {
    let text = read_optional_text(path)?.unwrap_or_default();
    parse_document(&text, format).with_context(|| format!("load {}", path.display()))
}

/// Parse document text. Zero-length JSON and blank or `null` YAML are empty
/// mappings.
pub fn parse_document(text: &str, format: Format) -> Result<Document> {
    match format {
        Format::Json => {
            if text.is_empty() {
                return Ok(Document::Json(JsonValue::empty_mapping()));
            }
            serde_json::from_str(text)
                .map(Document::Json)
                .context("parse JSON")
        }
        Format::Yaml => parse_yaml(text),
    }
}

#[cfg(feature = "yaml")]
fn parse_yaml(text: &str) -> Result<Document> {
    use serde_yaml::Value as YamlValue;

    if text.trim().is_empty() {
        return Ok(Document::Yaml(YamlValue::empty_mapping()));
    }
    let value: YamlValue = serde_yaml::from_str(text).context("parse YAML")?;
    Ok(Document::Yaml(if value.is_null() {
        YamlValue::empty_mapping()
    } else {
        value
    }))
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_text: &str) -> Result<Document> {
    Err(anyhow!(
        "YAML support unavailable: built without the `yaml` feature"
    ))
}

/// The node operations dotted-path edits need.
pub trait Tree: Sized {
    fn empty_mapping() -> Self;
    fn is_absent(&self) -> bool;
    /// Child under `key`, inserted as absent when missing. `None` when `self`
    /// is not a mapping.
    fn child_entry(&mut self, key: &str) -> Option<&mut Self>;
    fn child(&self, key: &str) -> Option<&Self>;
    /// Insert or replace `key` in place. `false` when `self` is not a mapping.
    fn put(&mut self, key: &str, value: Self) -> bool;
    /// Non-empty strings, non-zero numbers and `true`; everything else is
    /// unpopulated.
    fn populated_text(&self) -> Option<String>;
}

/// Set `dotted` to `value`, creating missing intermediate mappings.
///
/// An intermediate that exists and is not a mapping (or a non-mapping root) is
/// an error; `null` intermediates count as absent.
pub fn set_path<T: Tree>(root: &mut T, dotted: &str, value: T) -> Result<()> {
    let segments: Vec<&str> = dotted.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(anyhow!("invalid dotted path {dotted:?}: empty segment"));
    }
    let Some((last, parents)) = segments.split_last() else {
        return Err(anyhow!("invalid dotted path {dotted:?}"));
    };

    let mut current = root;
    for segment in parents {
        let child = current
            .child_entry(segment)
            .ok_or_else(|| not_a_mapping(dotted))?;
        if child.is_absent() {
            *child = T::empty_mapping();
        }
        current = child;
    }
    if current.put(last, value) {
        Ok(())
    } else {
        Err(not_a_mapping(dotted))
    }
}

/// Look up `dotted`, treating absent or non-mapping levels as empty.
pub fn get_path<'a, T: Tree>(root: &'a T, dotted: &str) -> Option<&'a T> {
    dotted
        .split('.')
        .try_fold(root, |node, segment| node.child(segment))
}

fn not_a_mapping(dotted: &str) -> anyhow::Error {
    anyhow!("parent for '{dotted}' is not a mapping")
}

impl Tree for JsonValue {
    fn empty_mapping() -> Self {
        JsonValue::Object(Map::new())
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn child_entry(&mut self, key: &str) -> Option<&mut Self> {
        let map = self.as_object_mut()?;
        Some(map.entry(key).or_insert(JsonValue::Null))
    }

    fn child(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn put(&mut self, key: &str, value: Self) -> bool {
        match self.as_object_mut() {
            Some(map) => {
                map.insert(key.to_string(), value);
                true
            }
            None => false,
        }
    }

    fn populated_text(&self) -> Option<String> {
        match self {
            JsonValue::String(text) if !text.is_empty() => Some(text.clone()),
            JsonValue::Number(number) if number.as_f64() != Some(0.0) => {
                Some(number.to_string())
            }
            JsonValue::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[cfg(feature = "yaml")]
impl Tree for serde_yaml::Value {
    fn empty_mapping() -> Self {
        serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn child_entry(&mut self, key: &str) -> Option<&mut Self> {
        let map = self.as_mapping_mut()?;
        Some(
            map.entry(serde_yaml::Value::String(key.to_string()))
                .or_insert(serde_yaml::Value::Null),
        )
    }

    fn child(&self, key: &str) -> Option<&Self> {
        self.as_mapping()?.get(key)
    }

    fn put(&mut self, key: &str, value: Self) -> bool {
        match self.as_mapping_mut() {
            Some(map) => {
                map.insert(serde_yaml::Value::String(key.to_string()), value);
                true
            }
            None => false,
        }
    }

    fn populated_text(&self) -> Option<String> {
        match self {
            serde_yaml::Value::String(text) if !text.is_empty() => Some(text.clone()),
            serde_yaml::Value::Number(number) if number.as_f64() != Some(0.0) => {
                Some(number.to_string())
            }
            serde_yaml::Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
