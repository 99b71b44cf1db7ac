//! Post-injection wiring checks.
//!
//! Every check always runs and appends to one [`VerificationReport`], so a
//! single run surfaces every problem instead of the first one.
mod paths;
mod source;

use crate::document::{load_document, Document, Format};
use crate::env::EnvSource;
use crate::util::mask;
use serde::Serialize;

pub use paths::WiringPaths;
use paths::{CONFIG_REL, SETTINGS_REL, SOURCE_REL};
use source::{is_placeholder, read_string_binding};

/// Environment variable checked by the fallback check and bound in the source file.
pub const API_TOKEN_VAR: &str = "API_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reveal {
    Masked,
    Full,
}

/// A value that passed its check, already masked when it is a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Default, Clone)]
pub struct VerificationReport {
    pub problems: Vec<String>,
    pub values: Vec<CheckedValue>,
}

impl VerificationReport {
    pub fn ok(&self) -> bool {
        self.problems.is_empty()
    }

    fn problem(&mut self, message: String) {
        self.problems.push(message);
    }

    fn checked(&mut self, label: String, value: &str, reveal: Reveal) {
        let value = match reveal {
            Reveal::Masked => mask(value),
            Reveal::Full => value.to_string(),
        };
        self.values.push(CheckedValue { label, value });
    }

    /// Human-readable summary printed by `swire verify`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.ok() {
            out.push_str("Secret wiring OK\n");
            for checked in &self.values {
                out.push_str(&format!("{}: {}\n", checked.label, checked.value));
            }
        } else {
            out.push_str("Secret wiring check FAILED:\n");
            for problem in &self.problems {
                out.push_str(&format!(" - {problem}\n"));
            }
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            ok: bool,
            problems: &'a [String],
            values: &'a [CheckedValue],
        }
        serde_json::to_string_pretty(&JsonReport {
            ok: self.ok(),
            problems: &self.problems,
            values: &self.values,
        })
    }
}

/// Run all four checks against the files under `paths` and `env`.
pub fn verify_wiring(paths: &WiringPaths, env: &dyn EnvSource) -> VerificationReport {
    let mut report = VerificationReport::default();
    check_primary_config(paths, &mut report);
    check_settings(paths, &mut report);
    check_source_token(paths, &mut report);
    check_env_token(env, &mut report);
    report
}

fn check_primary_config(paths: &WiringPaths, report: &mut VerificationReport) {
    let document = match load_document(&paths.config_path(), Format::Json) {
        Ok(document) => document,
        Err(err) => {
            report.problem(format!("{CONFIG_REL} load failed: {err:#}"));
            return;
        }
    };
    require_field(report, &document, CONFIG_REL, "api.key", Reveal::Masked);
    require_field(report, &document, CONFIG_REL, "api.endpoint", Reveal::Full);
}

fn check_settings(paths: &WiringPaths, report: &mut VerificationReport) {
    let path = paths.settings_path();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "settings file absent; check skipped");
        return;
    }
    let document = match load_document(&path, Format::Yaml) {
        Ok(document) => document,
        Err(err) => {
            report.problem(format!("{SETTINGS_REL} load failed: {err:#}"));
            return;
        }
    };
    require_field(report, &document, SETTINGS_REL, "service.api.key", Reveal::Masked);
    require_field(report, &document, SETTINGS_REL, "service.public_url", Reveal::Full);
}

fn check_source_token(paths: &WiringPaths, report: &mut VerificationReport) {
    let token = match read_string_binding(&paths.source_path(), API_TOKEN_VAR) {
        Ok(token) => token,
        Err(err) => {
            report.problem(format!("{SOURCE_REL} load failed: {err:#}"));
            return;
        }
    };
    if token.is_empty() || is_placeholder(&token) {
        report.problem(format!("{SOURCE_REL}: {API_TOKEN_VAR} placeholder not replaced"));
    } else {
        report.checked(format!("{SOURCE_REL} → {API_TOKEN_VAR}"), &token, Reveal::Masked);
    }
}

fn check_env_token(env: &dyn EnvSource, report: &mut VerificationReport) {
    match env.var(API_TOKEN_VAR).filter(|value| !value.is_empty()) {
        Some(token) => report.checked(format!("ENV → {API_TOKEN_VAR}"), &token, Reveal::Masked),
        None => report.problem(format!(
            "ENV: {API_TOKEN_VAR} not present (consider passing in job env)"
        )),
    }
}

fn require_field(
    report: &mut VerificationReport,
    document: &Document,
    file: &str,
    field: &str,
    reveal: Reveal,
) {
    match document.text_at(field) {
        Some(text) => report.checked(format!("{file} → {field}"), &text, reveal),
        None => report.problem(format!("{file}: {field} missing/empty")),
    }
}
