//! Python virtual environments (venv / virtualenv layouts)

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::Result;

use super::EnvironmentProbe;
use super::freeze::{parse_freeze_output, run_with_timeout};

/// Interpreter locations for POSIX and Windows layouts.
const INTERPRETERS: &[&str] = &["bin/python", "Scripts/python.exe"];

/// Written at the environment root by `python -m venv`.
const CONFIG_MARKER: &str = "pyvenv.cfg";

const PIP_LOCATIONS: &[&str] = &["bin/pip", "Scripts/pip.exe"];

/// Probe for Python virtual environments, listing packages with `pip freeze`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonVenv;

impl PythonVenv {
    fn pip(dir: &Path) -> Option<PathBuf> {
        PIP_LOCATIONS
            .iter()
            .map(|rel| dir.join(rel))
            .find(|candidate| candidate.exists())
    }
}

impl EnvironmentProbe for PythonVenv {
    fn kind(&self) -> &str {
        "virtual environment"
    }

    fn detect(&self, dir: &Path) -> bool {
        INTERPRETERS
            .iter()
            .chain(std::iter::once(&CONFIG_MARKER))
            .any(|rel| dir.join(rel).exists())
    }

    fn packages(&self, dir: &Path, timeout: Duration) -> Result<Vec<String>> {
        let Some(pip) = Self::pip(dir) else {
            debug!(path = %dir.display(), "no pip in environment");
            return Ok(Vec::new());
        };
        let stdout = run_with_timeout(&pip, &["freeze"], timeout)?;
        Ok(parse_freeze_output(&stdout))
    }
}
