//! Running a package manager's freeze command under a deadline

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run `program` with `args` and return its stdout as text.
///
/// The child is killed if it has not exited within `timeout`. Stdout is
/// drained on a helper thread so a long listing cannot fill the pipe and
/// stall the child. The same deadline bounds the wait for stdout to close,
/// which a background process started by the child can hold open.
pub fn run_with_timeout(program: &Path, args: &[&str], timeout: Duration) -> Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| Error::PackageSpawn {
            program: program.to_path_buf(),
            source,
        })?;

    let (tx, rx) = mpsc::channel();
    if let Some(mut stdout) = child.stdout.take() {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
    }

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(source) => {
                let _ = child.kill();
                return Err(Error::PackageWait {
                    program: program.to_path_buf(),
                    source,
                });
            }
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            // The reader is left detached: a grandchild may still hold the
            // pipe open.
            return Err(Error::PackageTimeout {
                program: program.to_path_buf(),
                timeout,
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    if !status.success() {
        return Err(Error::PackageStatus {
            program: program.to_path_buf(),
            status,
        });
    }

    let remaining = timeout.saturating_sub(start.elapsed());
    let bytes = match rx.recv_timeout(remaining) {
        Ok(bytes) => bytes,
        Err(mpsc::RecvTimeoutError::Disconnected) => Vec::new(),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            return Err(Error::PackageTimeout {
                program: program.to_path_buf(),
                timeout,
            });
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split freeze output into one package specifier per line.
///
/// Blank lines and `#` comment lines (pip prints these for editable installs
/// it cannot resolve) are dropped.
pub fn parse_freeze_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_freeze_output() {
        let out = "requests==2.31.0\nflask==3.0.0\n\n## !! Could not determine repository location\n";
        assert_eq!(
            parse_freeze_output(out),
            vec!["requests==2.31.0".to_string(), "flask==3.0.0".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_freeze_output() {
        assert!(parse_freeze_output("").is_empty());
        assert!(parse_freeze_output("\n").is_empty());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = run_with_timeout(
            Path::new("/nonexistent/treespect/pip"),
            &["freeze"],
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PackageSpawn { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn test_captures_stdout() {
        let out = run_with_timeout(
            Path::new("/bin/sh"),
            &["-c", "echo requests==2.31.0; echo idna==3.6"],
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            parse_freeze_output(&out),
            vec!["requests==2.31.0".to_string(), "idna==3.6".to_string()]
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_slow_command_times_out() {
        let start = Instant::now();
        let err = run_with_timeout(
            Path::new("/bin/sh"),
            &["-c", "sleep 5"],
            Duration::from_millis(100),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PackageTimeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    #[cfg(unix)]
    fn test_background_child_holding_stdout_times_out() {
        let start = Instant::now();
        let err = run_with_timeout(
            Path::new("/bin/sh"),
            &["-c", "echo requests==2.31.0; sleep 5 &"],
            Duration::from_millis(200),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PackageTimeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_command_is_status_error() {
        let err = run_with_timeout(Path::new("/bin/sh"), &["-c", "exit 3"], Duration::from_secs(10))
            .unwrap_err();
        assert!(matches!(err, Error::PackageStatus { .. }));
    }
}
