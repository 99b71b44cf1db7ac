//! Well-known locations checked by the verifier, relative to a project root.
use std::path::{Path, PathBuf};

pub const CONFIG_REL: &str = "config.json";
pub const SETTINGS_REL: &str = "settings.yaml";
pub const SOURCE_REL: &str = "app/app.py";

#[derive(Debug, Clone)]
pub struct WiringPaths {
    root: PathBuf,
}

impl WiringPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Primary JSON config (`config.json`).
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_REL)
    }

    /// Optional YAML settings (`settings.yaml`).
    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_REL)
    }

    /// Source file expected to bind the token (`app/app.py`).
    pub fn source_path(&self) -> PathBuf {
        self.root.join(SOURCE_REL)
    }
}
