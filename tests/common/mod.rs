//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch project directory that `swire` runs against.
pub struct Project {
    dir: TempDir,
}

/// Captured result of one `swire` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp project"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(&path, contents).expect("write project file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("read project file")
    }

    /// Run `swire` from the project root with only `env` in its environment.
    pub fn swire(&self, args: &[&str], env: &[(&str, &str)]) -> RunResult {
        Command::new(env!("CARGO_BIN_EXE_swire"))
            .args(args)
            .current_dir(self.root())
            .env_clear()
            .envs(env.iter().copied())
            .output()
            .expect("run swire")
            .into()
    }
}
