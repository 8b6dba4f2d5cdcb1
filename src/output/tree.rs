//! Tree rendering
//!
//! `render` turns a `TreeNode` into tree-drawing lines: files first, then
//! subdirectories, each group sorted, with the last item of a directory
//! drawn with the terminal connector. `TreeFormatter` adds the root header
//! and totals and can print with colors.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{Entry, TreeNode, TreeStats};

use super::config::OutputConfig;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const DIR_TAG: &str = "[dir] ";

/// Calculate the prefix for a child's own children.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}

/// What a rendered line stands for; only used to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    File,
    Directory,
    Environment,
    Marker,
}

impl LineKind {
    fn of(entry: &Entry) -> Self {
        match entry {
            Entry::File { .. } => LineKind::File,
            Entry::Environment { .. } => LineKind::Environment,
            _ => LineKind::Marker,
        }
    }

    fn color(self) -> Option<ColorSpec> {
        let mut spec = ColorSpec::new();
        match self {
            LineKind::File => return None,
            LineKind::Directory => spec.set_fg(Some(Color::Blue)).set_bold(true),
            LineKind::Environment => spec.set_fg(Some(Color::Green)),
            LineKind::Marker => spec.set_fg(Some(Color::Red)),
        };
        Some(spec)
    }
}

/// One line of tree output, split so the label can be colored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub prefix: String,
    pub connector: &'static str,
    pub label: String,
    pub kind: LineKind,
}

impl RenderedLine {
    pub fn text(&self) -> String {
        format!("{}{}{}", self.prefix, self.connector, self.label)
    }
}

/// Render the contents of `node` as plain lines, each starting with `prefix`.
pub fn render(node: &TreeNode, prefix: &str) -> Vec<String> {
    render_lines(node, prefix)
        .iter()
        .map(RenderedLine::text)
        .collect()
}

/// Render the contents of `node`, keeping line kinds for coloring.
pub fn render_lines(node: &TreeNode, prefix: &str) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    push_lines(node, prefix, &mut lines);
    lines
}

fn push_lines(node: &TreeNode, prefix: &str, lines: &mut Vec<RenderedLine>) {
    let mut files: Vec<(String, LineKind)> = node
        .files
        .iter()
        .map(|entry| (entry.to_string(), LineKind::of(entry)))
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut dirs: Vec<(&String, &TreeNode)> = node.subdirectories.iter().collect();
    dirs.sort_by(|a, b| a.0.cmp(b.0));

    let total = files.len() + dirs.len();
    let file_count = files.len();

    for (i, (label, kind)) in files.into_iter().enumerate() {
        let is_last = i + 1 == total;
        lines.push(RenderedLine {
            prefix: prefix.to_string(),
            connector: if is_last { LAST_BRANCH } else { BRANCH },
            label,
            kind,
        });
    }

    for (i, (name, child)) in dirs.into_iter().enumerate() {
        let is_last = file_count + i + 1 == total;
        lines.push(RenderedLine {
            prefix: prefix.to_string(),
            connector: if is_last { LAST_BRANCH } else { BRANCH },
            label: format!("{}{}", DIR_TAG, name),
            kind: LineKind::Directory,
        });
        push_lines(child, &continuation_prefix(prefix, is_last), lines);
    }
}

/// "3 directories, 12 files" plus environments when there are any.
pub fn summary_line(stats: &TreeStats) -> String {
    let mut line = format!("{} directories, {} files", stats.directories, stats.files);
    if stats.environments > 0 {
        line.push_str(&format!(", {} virtual environments", stats.environments));
    }
    line
}

/// Formatter for a complete tree: root label, rendered lines, totals.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, root_label: &str, node: &TreeNode) -> String {
        let mut output = String::new();
        output.push_str(root_label);
        output.push('\n');
        for line in render(node, "") {
            output.push_str(&line);
            output.push('\n');
        }
        if self.config.show_summary {
            output.push('\n');
            output.push_str(&summary_line(&node.stats()));
            output.push('\n');
        }
        output
    }

    pub fn print(&self, root_label: &str, node: &TreeNode) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_colored(&mut stdout, root_label, node)
    }

    /// Write the tree to any color-capable writer.
    pub fn write_colored<W: WriteColor>(
        &self,
        out: &mut W,
        root_label: &str,
        node: &TreeNode,
    ) -> io::Result<()> {
        if let Some(spec) = LineKind::Directory.color() {
            out.set_color(&spec)?;
        }
        write!(out, "{}", root_label)?;
        out.reset()?;
        writeln!(out)?;

        for line in render_lines(node, "") {
            write!(out, "{}{}", line.prefix, line.connector)?;
            match line.kind.color() {
                Some(spec) => {
                    out.set_color(&spec)?;
                    write!(out, "{}", line.label)?;
                    out.reset()?;
                }
                None => write!(out, "{}", line.label)?,
            }
            writeln!(out)?;
        }

        if self.config.show_summary {
            writeln!(out)?;
            writeln!(out, "{}", summary_line(&node.stats()))?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use termcolor::{Ansi, NoColor};

    use super::*;

    fn node(files: &[&str], dirs: Vec<(&str, TreeNode)>) -> TreeNode {
        TreeNode {
            files: files.iter().map(|f| Entry::file(*f)).collect(),
            subdirectories: dirs
                .into_iter()
                .map(|(name, child)| (name.to_string(), child))
                .collect(),
        }
    }

    fn sample_tree() -> TreeNode {
        let src = node(&["main.rs", "lib.rs"], vec![]);
        let docs = node(&["guide.md"], vec![]);
        node(&["Cargo.toml"], vec![("src", src), ("docs", docs)])
    }

    #[test]
    fn test_files_before_dirs_sorted() {
        let root = node(
            &["b.txt", "a.txt"],
            vec![("z", TreeNode::new()), ("m", TreeNode::new())],
        );
        let lines = render(&root, "");
        assert_eq!(
            lines,
            vec!["├── a.txt", "├── b.txt", "├── [dir] m", "└── [dir] z"]
        );
    }

    #[test]
    fn test_nested_prefixes() {
        let lines = render(&sample_tree(), "");
        assert_eq!(
            lines,
            vec![
                "├── Cargo.toml",
                "├── [dir] docs",
                "│   └── guide.md",
                "└── [dir] src",
                "    ├── lib.rs",
                "    └── main.rs",
            ]
        );
    }

    #[test]
    fn test_last_file_without_dirs_is_terminal() {
        let root = node(&["only.txt"], vec![]);
        assert_eq!(render(&root, ""), vec!["└── only.txt"]);
    }

    #[test]
    fn test_render_with_prefix() {
        let root = node(&["x"], vec![]);
        assert_eq!(render(&root, "│   "), vec!["│   └── x"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let tree = sample_tree();
        assert_eq!(render(&tree, ""), render(&tree, ""));
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        assert!(render(&TreeNode::new(), "").is_empty());
    }

    #[test]
    fn test_markers_sort_with_files() {
        let mut root = node(&["a.txt"], vec![]);
        root.files.push(Entry::DepthLimit);
        assert_eq!(
            render(&root, ""),
            vec!["├── [MAX DEPTH REACHED]", "└── a.txt"]
        );
    }

    #[test]
    fn test_format_with_summary() {
        let formatter = TreeFormatter::new(OutputConfig::plain());
        let output = formatter.format(".", &sample_tree());
        assert!(output.starts_with(".\n├── Cargo.toml\n"));
        assert!(output.ends_with("\n2 directories, 4 files\n"));
    }

    #[test]
    fn test_summary_mentions_environments() {
        let stats = TreeStats {
            directories: 1,
            files: 2,
            environments: 1,
        };
        assert_eq!(
            summary_line(&stats),
            "1 directories, 2 files, 1 virtual environments"
        );
    }

    #[test]
    fn test_write_colored_plain_matches_format() {
        let formatter = TreeFormatter::new(OutputConfig::plain());
        let tree = sample_tree();
        let mut out = NoColor::new(Vec::new());
        formatter.write_colored(&mut out, ".", &tree).unwrap();
        let written = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(written, formatter.format(".", &tree));
    }

    #[test]
    fn test_write_colored_marks_directories() {
        let formatter = TreeFormatter::new(OutputConfig::default());
        let mut out = Ansi::new(Vec::new());
        formatter
            .write_colored(&mut out, ".", &sample_tree())
            .unwrap();
        let written = String::from_utf8(out.into_inner()).unwrap();
        assert!(written.contains("\x1b["), "expected ANSI escapes: {}", written);
        assert!(written.contains("[dir] src"));
    }
}
