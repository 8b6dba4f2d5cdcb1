//! Name-based filtering for directory entries

use glob::Pattern;

use super::config::WalkerConfig;

/// Decides which directories are skipped and which files are hidden.
///
/// Ignore patterns are compiled once; a pattern that is not valid glob
/// syntax still matches by exact name.
pub struct EntryFilter {
    ignore: Vec<(String, Option<Pattern>)>,
    excluded_prefixes: Vec<String>,
    excluded_names: Vec<String>,
}

impl EntryFilter {
    pub fn new(config: &WalkerConfig) -> Self {
        Self {
            ignore: config
                .ignore_patterns
                .iter()
                .map(|p| (p.clone(), Pattern::new(p).ok()))
                .collect(),
            excluded_prefixes: config.excluded_prefixes.clone(),
            excluded_names: config.excluded_names.clone(),
        }
    }

    /// Directories that are neither recorded nor entered.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore.iter().any(|(raw, pattern)| {
            raw == name || pattern.as_ref().is_some_and(|p| p.matches(name))
        })
    }

    /// Files we wrote ourselves: earlier results and the program binary.
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
            || self.excluded_names.iter().any(|n| n == name)
    }
}
