//! Flat report of packages per virtual environment

use std::io::{self, Write};

use crate::env::{EnvironmentReport, package_name};

/// One block per environment: a header, two-space indented packages, and a
/// blank separator line.
pub fn format_report(reports: &[EnvironmentReport], include_versions: bool) -> String {
    let mut output = String::new();
    for report in reports {
        output.push_str(&format!("Virtual environment: {}\n", report.name));
        for package in &report.packages {
            let shown = if include_versions {
                package.as_str()
            } else {
                package_name(package)
            };
            output.push_str(&format!("  {}\n", shown));
        }
        output.push('\n');
    }
    output
}

/// Print the report to stdout.
pub fn print_report(reports: &[EnvironmentReport], include_versions: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(format_report(reports, include_versions).as_bytes())?;
    stdout.flush()
}
