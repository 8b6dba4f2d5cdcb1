//! TreeWalker - builds the directory tree with an explicit work stack
//!
//! The walk is iterative so it can stop at any point: each popped directory
//! first checks the wall-clock budget, and when it runs out the nodes built
//! so far are still assembled into a well-formed tree.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::env::{
    EnvironmentProbe, EnvironmentReport, PythonVenv, format_summary, query_packages,
};

use super::config::WalkerConfig;
use super::filter::EntryFilter;
use super::node::{Entry, TreeNode};

/// Result of one walk.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    pub tree: TreeNode,
    /// The time budget ran out and `tree` is partial
    pub timed_out: bool,
    /// Environments met during the walk, in visit order
    pub environments: Vec<EnvironmentReport>,
}

/// A node whose children are still referenced by arena index.
#[derive(Default)]
struct PendingNode {
    files: Vec<Entry>,
    children: Vec<(String, usize)>,
}

/// Work item: directory to list, arena index of its node, and its depth.
type Frame = (PathBuf, usize, usize);

/// Tree walker that builds the full tree in memory.
pub struct TreeWalker {
    config: WalkerConfig,
    filter: EntryFilter,
    probes: Vec<Box<dyn EnvironmentProbe>>,
}

impl TreeWalker {
    /// Walker with the default Python virtual environment probe.
    pub fn new(config: WalkerConfig) -> Self {
        let filter = EntryFilter::new(&config);
        Self {
            config,
            filter,
            probes: vec![Box::new(PythonVenv)],
        }
    }

    /// Add another environment probe; probes are tried in order.
    pub fn with_probe(mut self, probe: impl EnvironmentProbe + 'static) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    pub fn walk(&self, root: &Path) -> WalkOutcome {
        let start = Instant::now();
        let mut arena = vec![PendingNode::default()];
        let mut stack: Vec<Frame> = vec![(root.to_path_buf(), 0, 0)];
        let mut environments = Vec::new();
        let mut timed_out = false;

        while let Some((dir, index, depth)) = stack.pop() {
            if start.elapsed() >= self.config.timeout {
                info!(
                    pending = stack.len() + 1,
                    "time budget of {} exhausted, returning partial tree",
                    humantime::format_duration(self.config.timeout)
                );
                timed_out = true;
                break;
            }

            debug!(path = %dir.display(), depth, "listing directory");
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!(path = %dir.display(), "cannot list directory: {}", e);
                    arena[index].files.push(Entry::from_list_error(&e));
                    continue;
                }
            };

            let mut truncated = false;
            let mut taken = HashSet::new();
            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!(path = %dir.display(), "skipping unreadable entry: {}", e);
                        continue;
                    }
                };
                let name = entry.file_name().to_string_lossy().into_owned();
                let path = entry.path();
                let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());
                // `Path::is_dir` follows links, so a link to a directory counts.
                let is_dir = path.is_dir();

                if !is_dir {
                    if !self.filter.is_excluded_file(&name) {
                        arena[index].files.push(Entry::File { name });
                    }
                    continue;
                }

                if self.filter.is_ignored_dir(&name) {
                    continue;
                }

                if let Some(probe) = self.detect_environment(&path) {
                    let env_entry = self.environment_entry(probe, name, &path, &mut environments);
                    arena[index].files.push(env_entry);
                    continue;
                }

                if depth + 1 > self.config.max_depth {
                    truncated = true;
                    continue;
                }

                let name = unique_name(&mut taken, name);
                let child = arena.len();
                arena.push(PendingNode::default());
                arena[index].children.push((name, child));

                if is_symlink && !self.config.follow_symlinks {
                    continue;
                }
                stack.push((path, child, depth + 1));
            }

            if truncated {
                arena[index].files.push(Entry::DepthLimit);
            }
        }

        WalkOutcome {
            tree: assemble(arena),
            timed_out,
            environments,
        }
    }

    fn detect_environment(&self, dir: &Path) -> Option<&dyn EnvironmentProbe> {
        self.probes
            .iter()
            .map(|probe| probe.as_ref())
            .find(|probe| probe.detect(dir))
    }

    fn environment_entry(
        &self,
        probe: &dyn EnvironmentProbe,
        name: String,
        path: &Path,
        reports: &mut Vec<EnvironmentReport>,
    ) -> Entry {
        let packages = if self.config.wants_packages() {
            query_packages(probe, path, self.config.package_timeout)
        } else {
            Vec::new()
        };
        let summary = format_summary(&packages, self.config.package_detail);

        if self.config.collect_packages {
            reports.push(EnvironmentReport {
                name: name.clone(),
                path: path.to_path_buf(),
                packages,
            });
        }

        Entry::Environment {
            kind: probe.kind().to_string(),
            name,
            summary,
        }
    }
}

/// Non-UTF-8 names are shown lossily, so two siblings can share a label.
/// Later ones get a `~N` suffix instead of replacing the earlier subtree.
fn unique_name(taken: &mut HashSet<String>, name: String) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}~{}", name, n);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Fold the arena into an owned tree. Children always sit at higher indices
/// than their parent, so a reverse pass finishes every child first.
fn assemble(arena: Vec<PendingNode>) -> TreeNode {
    let mut built: Vec<Option<TreeNode>> = (0..arena.len()).map(|_| None).collect();

    for (index, pending) in arena.into_iter().enumerate().rev() {
        let mut node = TreeNode {
            files: pending.files,
            ..Default::default()
        };
        for (name, child) in pending.children {
            if let Some(child_node) = built[child].take() {
                node.subdirectories.insert(name, child_node);
            }
        }
        built[index] = Some(node);
    }

    built.into_iter().next().flatten().unwrap_or_default()
}

/// Walk `root` with `config` using the default probes and return the tree.
pub fn traverse(root: &Path, config: WalkerConfig) -> TreeNode {
    TreeWalker::new(config).walk(root).tree
}
