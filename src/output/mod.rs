//! Tree formatting and display
//!
//! - `tree` - plain and colored tree rendering
//! - `json` - JSON output
//! - `report` - per-environment package report
//! - `save` - timestamped result files

mod config;
mod json;
mod report;
mod save;
mod tree;

pub use config::OutputConfig;
pub use json::print_json;
pub use report::{format_report, print_report};
pub use save::{PACKAGES_FILE_PREFIX, RESULT_FILE_PREFIX, save_to_file, timestamped_filename};
pub use tree::{
    LineKind, RenderedLine, TreeFormatter, continuation_prefix, render, render_lines, summary_line,
};
