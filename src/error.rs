//! Error types for package queries and result files.
//!
//! Directory listing failures never surface here: the walker turns them into
//! marker entries so a single unreadable directory cannot fail the scan.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start {}: {source}", .program.display())]
    PackageSpawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("failed waiting for {}: {source}", .program.display())]
    PackageWait {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("{} did not finish within {timeout:?}", .program.display())]
    PackageTimeout { program: PathBuf, timeout: Duration },

    #[error("{} exited with {status}", .program.display())]
    PackageStatus { program: PathBuf, status: ExitStatus },

    #[error("error saving result to {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
