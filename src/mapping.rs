//! Mapping descriptor: which files receive which values.
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// Parsed `mapping.json`. Every section is optional and keeps file order.
#[derive(Debug, Default, Deserialize)]
pub struct MappingDescriptor {
    /// target file → dotted path → value spec
    #[serde(default, deserialize_with = "null_as_default")]
    pub structured: IndexMap<String, IndexMap<String, String>>,
    /// target file → variable names replaced as `${NAME}`
    #[serde(default, deserialize_with = "null_as_default")]
    pub tokens: IndexMap<String, Vec<String>>,
    /// structured target file → template used when the target is absent
    #[serde(default, deserialize_with = "null_as_default")]
    pub templates: IndexMap<String, String>,
}

impl MappingDescriptor {
    pub fn template_for(&self, target: &str) -> Option<&str> {
        self.templates.get(target).map(String::as_str)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn parse_mapping(text: &str) -> Result<MappingDescriptor> {
    serde_json::from_str(text).context("parse mapping JSON")
}

/// Load the descriptor; the caller checks existence beforehand.
pub fn load_mapping(path: &Path) -> Result<MappingDescriptor> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read mapping {}", path.display()))?;
    parse_mapping(&text).with_context(|| format!("load mapping {}", path.display()))
}
