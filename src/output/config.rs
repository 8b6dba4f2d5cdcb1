//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Append the "N directories, M files" line after the tree
    pub show_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_summary: true,
        }
    }
}

impl OutputConfig {
    /// Plain text, as written to result files.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            ..Default::default()
        }
    }
}
