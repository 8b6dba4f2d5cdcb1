//! Package summary text appended to virtual environment entries

use clap::ValueEnum;

/// How much package information to show next to a virtual environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PackageDetail {
    /// Only mark the directory as a virtual environment
    None,
    /// Number of installed packages
    #[default]
    Count,
    /// Package names without versions
    Names,
    /// Pinned `name==version` specifiers
    Full,
}

impl PackageDetail {
    /// Whether this level needs the package manager to be queried at all.
    pub fn needs_packages(self) -> bool {
        !matches!(self, PackageDetail::None)
    }
}

/// Strip the pinned version from a freeze line, leaving the package name.
pub fn package_name(spec: &str) -> &str {
    spec.split_once("==").map_or(spec, |(name, _)| name).trim()
}

/// Build the parenthesized summary for a list of freeze lines.
///
/// Blank lines never count as packages, so a freeze that printed nothing
/// reports zero rather than one.
pub fn format_summary(packages: &[String], detail: PackageDetail) -> Option<String> {
    let installed = packages.iter().filter(|p| !p.trim().is_empty());

    match detail {
        PackageDetail::None => None,
        PackageDetail::Count => Some(format!("({} packages installed)", installed.count())),
        PackageDetail::Names => {
            let names: Vec<&str> = installed.map(|p| package_name(p)).collect();
            Some(format!("(packages: {})", names.join(", ")))
        }
        PackageDetail::Full => {
            let specs: Vec<&str> = installed.map(|p| p.trim()).collect();
            Some(format!("(packages: {})", specs.join(", ")))
        }
    }
}
