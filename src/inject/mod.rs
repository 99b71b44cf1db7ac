//! Injection of resolved values into target files.
//!
//! Structured targets (JSON/YAML) are processed first, then token files. Both
//! feed one run-wide [`MissingVars`] set that strict mode checks at the end.
mod structured;
mod tokens;

use crate::env::EnvSource;
use crate::mapping::MappingDescriptor;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use structured::inject_structured;
use tokens::inject_tokens;

/// Deduplicated, sorted set of variables that resolved to nothing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MissingVars(BTreeSet<String>);

impl MissingVars {
    pub fn record(&mut self, name: &str) {
        self.0.insert(name.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Comma-separated names in alphabetical order.
    pub fn joined(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    /// Single-line message written to stderr in strict mode.
    pub fn summary(&self) -> String {
        format!("Missing required env(s): {}", self.joined())
    }
}

/// What a full injection run touched.
#[derive(Debug, Default)]
pub struct InjectReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub missing: MissingVars,
}

/// Apply every section of `mapping`, resolving relative targets against `root`.
///
/// A configuration error in one file aborts the run before later files are
/// touched.
pub fn inject_all(
    mapping: &MappingDescriptor,
    root: &Path,
    env: &dyn EnvSource,
) -> Result<InjectReport> {
    let mut report = InjectReport::default();

    for (target, entries) in &mapping.structured {
        let path = root.join(target);
        let template = mapping.template_for(target).map(|rel| root.join(rel));
        inject_structured(&path, entries, template.as_deref(), env, &mut report.missing)
            .with_context(|| format!("inject structured values into {target}"))?;
        tracing::info!(path = %path.display(), entries = entries.len(), "structured file written");
        report.written.push(path);
    }

    for (target, names) in &mapping.tokens {
        let path = root.join(target);
        let wrote = inject_tokens(&path, names, env, &mut report.missing)
            .with_context(|| format!("inject tokens into {target}"))?;
        if wrote {
            tracing::info!(path = %path.display(), tokens = names.len(), "token file written");
            report.written.push(path);
        } else {
            tracing::debug!(path = %path.display(), "token file absent; skipped");
            report.skipped.push(path);
        }
    }

    Ok(report)
}
