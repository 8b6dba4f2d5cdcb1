//! Directory tree walking logic
//!
//! `TreeWalker` walks a directory with an explicit stack, bounded by depth
//! and by a wall-clock budget, and builds a `TreeNode` tree. Virtual
//! environments are folded into a single entry of their parent.

mod config;
mod filter;
mod node;
mod walker;

pub use config::{
    DEFAULT_IGNORE_DIRS, DEFAULT_MAX_DEPTH, DEFAULT_PACKAGE_TIMEOUT, DEFAULT_TIMEOUT, WalkerConfig,
};
pub use filter::EntryFilter;
pub use node::{DEPTH_LIMIT_MARKER, Entry, PERMISSION_DENIED_MARKER, TreeNode, TreeStats};
pub use walker::{TreeWalker, WalkOutcome, traverse};
