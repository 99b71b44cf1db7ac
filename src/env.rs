//! Environment lookup used by value resolution and verification.
//!
//! Resolution never reads the process environment directly; callers pass an
//! [`EnvSource`] so tests can supply a fixed map instead of mutating real
//! variables.
use std::collections::BTreeMap;

/// Read-only key/value lookup over environment variables.
///
/// `Some("")` means the variable is set but empty, which is distinct from
/// `None` (unset).
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// Fixed environment backed by an ordered map.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Snapshot the process environment once so a whole run resolves against
    /// the same values. Variables whose name or value is not UTF-8 are left out
    /// and therefore read as unset.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| {
                Some((name.into_string().ok()?, value.into_string().ok()?))
            })
            .collect()
    }
}

#[cfg(test)]
impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
