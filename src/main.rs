//! CLI entry point for treespect

use std::ffi::OsStr;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use treespect::output::{
    PACKAGES_FILE_PREFIX, RESULT_FILE_PREFIX, format_report, print_report, save_to_file,
    timestamped_filename,
};
use treespect::tree::{DEFAULT_IGNORE_DIRS, DEFAULT_MAX_DEPTH};
use treespect::{OutputConfig, PackageDetail, TreeFormatter, TreeWalker, WalkerConfig, print_json};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Package detail for the saved environment report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportDetail {
    /// Package names only
    Names,
    /// name==version
    Full,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treespect")]
#[command(about = "Directory structure visualizer with virtual environment summaries")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level", default_value_t = DEFAULT_MAX_DEPTH)]
    level: usize,

    /// Stop scanning after DURATION and show what was found (e.g. 300, 30s, 5m)
    #[arg(long = "timeout", value_name = "DURATION", default_value = "300", value_parser = parse_duration_arg)]
    timeout: Duration,

    /// Time limit for each `pip freeze` call
    #[arg(long = "package-timeout", value_name = "DURATION", default_value = "10", value_parser = parse_duration_arg)]
    package_timeout: Duration,

    /// Ignore directories matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Do not skip cache and version-control directories
    #[arg(short, long)]
    all: bool,

    /// Descend into symlinked directories
    #[arg(long = "follow-links")]
    follow_links: bool,

    /// Show installed packages in virtual environments (--venv-packages=names)
    #[arg(
        long = "venv-packages",
        value_name = "DETAIL",
        default_value = "count",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "count"
    )]
    venv_packages: PackageDetail,

    /// Show only virtual environment information without the full tree
    #[arg(long = "venv-only")]
    venv_only: bool,

    /// Save virtual environment packages to a file (--venv-packages-save=names)
    #[arg(
        long = "venv-packages-save",
        value_name = "DETAIL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "full"
    )]
    venv_packages_save: Option<ReportDetail>,

    /// Save the tree to a timestamped file in the current directory
    #[arg(short = 's', long = "save")]
    save: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log each directory as it is scanned
    #[arg(short, long)]
    verbose: bool,
}

/// Parse plain seconds ("300") or a humantime duration ("5m", "1h 30m").
fn parse_duration_arg(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "treespect=debug"
    } else {
        "treespect=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// File names of the running program, so it never lists itself.
fn own_names() -> Vec<String> {
    let mut names = Vec::new();
    let invoked = std::env::args_os().next().map(PathBuf::from);
    let exe = std::env::current_exe().ok();
    for path in invoked.iter().chain(exe.iter()) {
        if let Some(name) = path.file_name().and_then(OsStr::to_str) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

fn walker_config(args: &Args) -> WalkerConfig {
    let mut ignore_patterns: Vec<String> = if args.all {
        Vec::new()
    } else {
        DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect()
    };
    ignore_patterns.extend(args.ignore.iter().cloned());

    WalkerConfig {
        max_depth: args.level,
        timeout: args.timeout,
        package_timeout: args.package_timeout,
        package_detail: args.venv_packages,
        collect_packages: args.venv_only || args.venv_packages_save.is_some(),
        follow_symlinks: args.follow_links,
        ignore_patterns,
        excluded_names: own_names(),
        ..Default::default()
    }
}

/// Write `contents` to a new timestamped file, reporting the outcome.
fn save_result(prefix: &str, what: &str, contents: &str) -> bool {
    let filename = timestamped_filename(prefix, chrono::Local::now());
    match save_to_file(Path::new(&filename), contents) {
        Ok(()) => {
            eprintln!("treespect: {} saved to {}", what, filename);
            true
        }
        Err(e) => {
            eprintln!("treespect: {}", e);
            false
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let root = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.path)
    };

    if !root.is_dir() {
        eprintln!(
            "treespect: cannot access '{}': No such directory",
            args.path.display()
        );
        process::exit(1);
    }

    let walker = TreeWalker::new(walker_config(&args));
    let outcome = walker.walk(&root);

    if outcome.timed_out {
        eprintln!(
            "treespect: scan stopped after {}, showing partial results",
            humantime::format_duration(args.timeout)
        );
    }

    let mut ok = true;

    if args.venv_only || args.venv_packages_save.is_some() {
        let include_versions = args.venv_packages_save != Some(ReportDetail::Names);
        if args.venv_only {
            if let Err(e) = print_report(&outcome.environments, include_versions) {
                eprintln!("treespect: error writing output: {}", e);
                ok = false;
            }
        }
        if args.venv_packages_save.is_some() {
            let report = format_report(&outcome.environments, include_versions);
            ok &= save_result(PACKAGES_FILE_PREFIX, "virtual environment packages", &report);
        }
    } else {
        let root_label = args.path.display().to_string();
        let printed = if args.json {
            print_json(&outcome.tree)
        } else {
            let config = OutputConfig {
                use_color: should_use_color(args.color),
                ..Default::default()
            };
            TreeFormatter::new(config).print(&root_label, &outcome.tree)
        };
        if let Err(e) = printed {
            eprintln!("treespect: error writing output: {}", e);
            ok = false;
        }

        if args.save {
            let text = TreeFormatter::new(OutputConfig::plain()).format(&root_label, &outcome.tree);
            ok &= save_result(RESULT_FILE_PREFIX, "result", &text);
        }
    }

    if !ok {
        process::exit(1);
    }
}
