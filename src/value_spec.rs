//! Value specifications from the mapping descriptor.
//!
//! A spec string is parsed once into a closed [`ValueSpec`] so resolution is an
//! exhaustive match instead of repeated prefix checks.
use crate::env::EnvSource;

const ENV_PREFIX: &str = "env:";
const LITERAL_PREFIX: &str = "literal:";
const DEFAULT_PREFIX: &str = "default:";

/// How a single injected value is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec {
    /// `env:NAME`
    Env(String),
    /// `literal:VALUE`
    Literal(String),
    /// `default:NAME:FALLBACK`
    Default { name: String, fallback: String },
    /// Any string without a recognized prefix names an environment variable.
    Bare(String),
}

impl ValueSpec {
    /// Parse a spec string. Parsing is total: unknown shapes fall back to
    /// [`ValueSpec::Bare`].
    pub fn parse(spec: &str) -> Self {
        if let Some(name) = spec.strip_prefix(ENV_PREFIX) {
            return Self::Env(name.to_string());
        }
        if let Some(value) = spec.strip_prefix(LITERAL_PREFIX) {
            return Self::Literal(value.to_string());
        }
        if let Some(rest) = spec.strip_prefix(DEFAULT_PREFIX) {
            // The fallback keeps any further colons.
            let (name, fallback) = rest.split_once(':').unwrap_or((rest, ""));
            return Self::Default {
                name: name.to_string(),
                fallback: fallback.to_string(),
            };
        }
        Self::Bare(spec.to_string())
    }

    /// Resolve to a concrete value. Unset variables yield an empty string;
    /// required-ness is the caller's concern.
    pub fn resolve(&self, env: &dyn EnvSource) -> String {
        match self {
            Self::Env(name) | Self::Bare(name) => env.var(name).unwrap_or_default(),
            Self::Literal(value) => value.clone(),
            Self::Default { name, fallback } => {
                env.var(name).unwrap_or_else(|| fallback.clone())
            }
        }
    }

    /// Name of the variable behind an `env:` spec when that variable is unset.
    pub fn unset_env_var(&self, env: &dyn EnvSource) -> Option<&str> {
        match self {
            Self::Env(name) if env.var(name).is_none() => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "value_spec_tests.rs"]
mod tests;
