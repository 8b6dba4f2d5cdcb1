//! In-memory tree built by the walker

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use serde::Serialize;

pub const DEPTH_LIMIT_MARKER: &str = "[MAX DEPTH REACHED]";
pub const PERMISSION_DENIED_MARKER: &str = "[PERMISSION DENIED]";

/// One non-directory line in a directory listing.
///
/// Rendering and sorting only look at the label produced by `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    File {
        name: String,
    },
    Environment {
        kind: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    DepthLimit,
    PermissionDenied,
    Error {
        message: String,
    },
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Entry::File { name: name.into() }
    }

    /// Marker recorded in place of a directory's contents when listing fails.
    pub fn from_list_error(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Entry::PermissionDenied,
            _ => Entry::Error {
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::File { name } => f.write_str(name),
            Entry::Environment {
                kind,
                name,
                summary,
            } => {
                write!(f, "[{}] {}", kind, name)?;
                if let Some(summary) = summary {
                    write!(f, " {}", summary)?;
                }
                Ok(())
            }
            Entry::DepthLimit => f.write_str(DEPTH_LIMIT_MARKER),
            Entry::PermissionDenied => f.write_str(PERMISSION_DENIED_MARKER),
            Entry::Error { message } => write!(f, "[ERROR: {}]", message),
        }
    }
}

/// A visited directory: its entries and its child directories by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub files: Vec<Entry>,
    pub subdirectories: BTreeMap<String, TreeNode>,
}

/// Totals over a whole tree, excluding the root directory itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
    pub environments: usize,
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of this directory's entries, in stored order.
    pub fn labels(&self) -> Vec<String> {
        self.files.iter().map(Entry::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirectories.is_empty()
    }

    /// Number of directory levels below this node (a leaf is 0).
    pub fn height(&self) -> usize {
        self.subdirectories
            .values()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for entry in &self.files {
            match entry {
                Entry::File { .. } => stats.files += 1,
                Entry::Environment { .. } => stats.environments += 1,
                _ => {}
            }
        }
        for child in self.subdirectories.values() {
            let sub = child.stats();
            stats.directories += sub.directories + 1;
            stats.files += sub.files;
            stats.environments += sub.environments;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_labels() {
        assert_eq!(Entry::file("a.txt").to_string(), "a.txt");
        assert_eq!(Entry::DepthLimit.to_string(), "[MAX DEPTH REACHED]");
        assert_eq!(Entry::PermissionDenied.to_string(), "[PERMISSION DENIED]");
        assert_eq!(
            Entry::Error {
                message: "boom".to_string()
            }
            .to_string(),
            "[ERROR: boom]"
        );
        let env = Entry::Environment {
            kind: "virtual environment".to_string(),
            name: "venv".to_string(),
            summary: Some("(2 packages installed)".to_string()),
        };
        assert_eq!(
            env.to_string(),
            "[virtual environment] venv (2 packages installed)"
        );
    }

    #[test]
    fn test_list_error_classification() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(Entry::from_list_error(&denied), Entry::PermissionDenied);

        let other = io::Error::new(io::ErrorKind::Other, "disk on fire");
        assert_eq!(
            Entry::from_list_error(&other).to_string(),
            "[ERROR: disk on fire]"
        );
    }

    #[test]
    fn test_stats_and_height() {
        let mut src = TreeNode::new();
        src.files.push(Entry::file("lib.rs"));
        let mut root = TreeNode::new();
        root.files.push(Entry::file("Cargo.toml"));
        root.files.push(Entry::Environment {
            kind: "virtual environment".to_string(),
            name: ".venv".to_string(),
            summary: None,
        });
        root.files.push(Entry::DepthLimit);
        root.subdirectories.insert("src".to_string(), src);

        let stats = root.stats();
        assert_eq!(stats.directories, 1);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.environments, 1);
        assert_eq!(root.height(), 1);
    }
}
