//! Configuration types for tree walkers

use std::time::Duration;

use crate::env::PackageDetail;
use crate::output::{PACKAGES_FILE_PREFIX, RESULT_FILE_PREFIX};

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_PACKAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Cache and version-control metadata directories skipped unless `--all`.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &["__pycache__", ".git", ".hg", ".svn"];

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Deepest directory level that becomes a node (root = 0)
    pub max_depth: usize,
    /// Wall-clock budget for the whole walk
    pub timeout: Duration,
    /// Budget for each package manager invocation, independent of `timeout`
    pub package_timeout: Duration,
    pub package_detail: PackageDetail,
    /// Query packages for environment reports even when `package_detail` is none
    pub collect_packages: bool,
    pub follow_symlinks: bool,
    /// Directory names or glob patterns that are neither listed nor entered
    pub ignore_patterns: Vec<String>,
    /// File name prefixes of our own result files
    pub excluded_prefixes: Vec<String>,
    /// Exact file names never listed (the running program itself)
    pub excluded_names: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            timeout: DEFAULT_TIMEOUT,
            package_timeout: DEFAULT_PACKAGE_TIMEOUT,
            package_detail: PackageDetail::default(),
            collect_packages: false,
            follow_symlinks: false,
            ignore_patterns: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            excluded_prefixes: vec![
                RESULT_FILE_PREFIX.to_string(),
                PACKAGES_FILE_PREFIX.to_string(),
            ],
            excluded_names: Vec::new(),
        }
    }
}

impl WalkerConfig {
    /// Whether the walker has to run package queries at all.
    pub fn wants_packages(&self) -> bool {
        self.collect_packages || self.package_detail.needs_packages()
    }
}
