//! Virtual environment detection and package queries
//!
//! A directory is recognized as an environment by an [`EnvironmentProbe`].
//! The walker never descends into a recognized environment; it records a
//! single summary entry in the parent directory instead. Probes are
//! existence-based, so adding another ecosystem means adding a probe, not
//! touching the walker.

mod freeze;
mod python;
mod summary;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::error::Result;

pub use freeze::{parse_freeze_output, run_with_timeout};
pub use python::PythonVenv;
pub use summary::{PackageDetail, format_summary, package_name};

/// Detects one kind of language-runtime environment directory.
pub trait EnvironmentProbe {
    /// Tag shown in brackets before the directory name, e.g. `virtual environment`.
    fn kind(&self) -> &str;

    /// Whether `dir` is an environment of this kind.
    fn detect(&self, dir: &Path) -> bool;

    /// Installed packages as `name==version` lines.
    fn packages(&self, dir: &Path, timeout: Duration) -> Result<Vec<String>>;
}

/// Query an environment's packages, treating any failure as an empty list.
pub fn query_packages(probe: &dyn EnvironmentProbe, dir: &Path, timeout: Duration) -> Vec<String> {
    match probe.packages(dir, timeout) {
        Ok(packages) => packages,
        Err(e) => {
            warn!(path = %dir.display(), "package query failed: {}", e);
            Vec::new()
        }
    }
}

/// Packages found in one environment during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub name: String,
    pub path: PathBuf,
    pub packages: Vec<String>,
}
