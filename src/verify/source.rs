//! Reading a token bound in a source-like file, e.g. `API_TOKEN = "abc"`.
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"^\$\{[^{}]*\}$").expect("regex for whole-value placeholder")
    })
}

/// Return the string literal bound to `name` at the start of a line. When the
/// name is assigned more than once the last assignment wins.
pub(super) fn read_string_binding(path: &Path, name: &str) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let binding = Regex::new(&format!(
        r#"(?m)^[ \t]*{}[ \t]*=[ \t]*(?:"([^"\n]*)"|'([^'\n]*)')"#,
        regex::escape(name)
    ))
    .context("build binding regex")?;
    binding
        .captures_iter(&text)
        .last()
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|value| value.as_str().to_string())
        .ok_or_else(|| anyhow!("no string assignment to {name} in {}", path.display()))
}

/// Whether a value is still an unreplaced `${NAME}` placeholder.
pub(super) fn is_placeholder(value: &str) -> bool {
    placeholder_regex().is_match(value)
}
