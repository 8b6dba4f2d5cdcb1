//! Timestamped result files

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

pub const RESULT_FILE_PREFIX: &str = "treespect_result_";
pub const PACKAGES_FILE_PREFIX: &str = "venv_packages_";

/// `<prefix><YYYYmmdd_HHMMSS>.txt`
pub fn timestamped_filename(prefix: &str, now: DateTime<Local>) -> String {
    format!("{}{}.txt", prefix, now.format("%Y%m%d_%H%M%S"))
}

pub fn save_to_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_timestamped_filename() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(
            timestamped_filename(RESULT_FILE_PREFIX, now),
            "treespect_result_20240309_070502.txt"
        );
        assert_eq!(
            timestamped_filename(PACKAGES_FILE_PREFIX, now),
            "venv_packages_20240309_070502.txt"
        );
    }

    #[test]
    fn test_save_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        save_to_file(&path, "└── a.txt\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "└── a.txt\n");
    }

    #[test]
    fn test_save_failure_is_output_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = save_to_file(&path, "x").unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
        assert!(err.to_string().contains("out.txt"));
    }
}
