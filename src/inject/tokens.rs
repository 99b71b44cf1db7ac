use super::MissingVars;
use crate::env::EnvSource;
use crate::files::{read_optional_text, write_text};
use crate::value_spec::ValueSpec;
use anyhow::Result;
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([^{}]*)\}").expect("regex for ${NAME} placeholders")
    })
}

/// Replace `${NAME}` placeholders for each listed variable. Returns `false`
/// when the file does not exist.
pub(super) fn inject_tokens(
    path: &Path,
    names: &[String],
    env: &dyn EnvSource,
    missing: &mut MissingVars,
) -> Result<bool> {
    let Some(content) = read_optional_text(path)? else {
        return Ok(false);
    };

    let mut values = HashMap::new();
    for name in names {
        let value = ValueSpec::Env(name.clone()).resolve(env);
        if value.is_empty() {
            missing.record(name);
        }
        values.insert(name.as_str(), value);
    }

    for leftover in unlisted_placeholders(&content, &values) {
        tracing::warn!(
            path = %path.display(),
            var = leftover,
            "placeholder not listed in mapping; left as is"
        );
    }

    write_text(path, &replace_placeholders(&content, &values))?;
    Ok(true)
}

/// Single pass over the text: substituted values are never rescanned.
pub(super) fn replace_placeholders(content: &str, values: &HashMap<&str, String>) -> String {
    placeholder_regex()
        .replace_all(content, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn unlisted_placeholders<'a>(
    content: &'a str,
    values: &HashMap<&str, String>,
) -> BTreeSet<&'a str> {
    placeholder_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .filter(|name| !values.contains_key(name))
        .collect()
}
