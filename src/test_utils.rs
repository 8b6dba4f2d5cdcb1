//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a minimal Python virtual environment (only `pyvenv.cfg` and an
    /// empty site-packages).
    pub fn add_venv(&self, path: &str) -> PathBuf {
        self.add_file(&format!("{}/pyvenv.cfg", path), "home = /usr/bin\n");
        self.add_dir(&format!("{}/lib/site-packages", path));
        self.dir.path().join(path)
    }

    /// Add a virtual environment whose `bin/pip` is a shell script.
    ///
    /// The script is written with mode 0755 so it can stand in for `pip freeze`.
    #[cfg(unix)]
    pub fn add_venv_with_pip(&self, path: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let venv = self.add_venv(path);
        let pip = self.add_file(&format!("{}/bin/pip", path), script);
        fs::set_permissions(&pip, fs::Permissions::from_mode(0o755))
            .expect("Failed to make pip executable");
        venv
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
