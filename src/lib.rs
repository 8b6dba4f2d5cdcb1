//! treespect - a directory tree visualizer that summarizes virtual environments

pub mod env;
pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use env::{EnvironmentProbe, EnvironmentReport, PackageDetail, PythonVenv};
pub use error::{Error, Result};
pub use output::{OutputConfig, TreeFormatter, print_json, render};
pub use tree::{Entry, TreeNode, TreeWalker, WalkOutcome, WalkerConfig, traverse};
