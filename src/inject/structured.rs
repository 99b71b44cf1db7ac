use super::MissingVars;
use crate::document::{load_document, Format};
use crate::env::EnvSource;
use crate::files::{bootstrap_from_template, write_text};
use crate::value_spec::ValueSpec;
use anyhow::Result;
use indexmap::IndexMap;
use std::path::Path;

/// Load (or bootstrap) one structured file, set every dotted path, and write it
/// back in its own format.
///
/// `env:` specs whose variable is unset are recorded in `missing`; the empty
/// value is still written.
pub fn inject_structured(
    path: &Path,
    entries: &IndexMap<String, String>,
    template: Option<&Path>,
    env: &dyn EnvSource,
    missing: &mut MissingVars,
) -> Result<()> {
    if let Some(template) = template {
        if bootstrap_from_template(path, template)? {
            tracing::info!(
                path = %path.display(),
                template = %template.display(),
                "bootstrapped from template"
            );
        }
    }

    let format = Format::from_path(path)?;
    let mut document = load_document(path, format)?;

    for (dotted, raw_spec) in entries {
        let spec = ValueSpec::parse(raw_spec);
        if let Some(name) = spec.unset_env_var(env) {
            tracing::debug!(var = name, path = dotted.as_str(), "environment variable unset");
            missing.record(name);
        }
        document.set_text(dotted, spec.resolve(env))?;
    }

    let text = document.render()?;
    write_text(path, &text)
}
