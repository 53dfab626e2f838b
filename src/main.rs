use anyhow::{Context, Result};
use clap::Parser;
use mdscrub::{root_for_executable, scan_tree, ScanOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Strip emoji and normalize whitespace in a project's markdown files",
    long_about = None
)]
struct Args {
    /// Directory to scan (defaults to the parent of the directory holding this executable)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Additional directory names to skip (can be specified multiple times)
    #[arg(long, short = 'x')]
    exclude: Vec<String>,

    /// List files that would be cleaned, but don't rewrite them
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Log every visited and skipped path to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Root derived from the location of the running executable
fn executable_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let exe = exe
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", exe.display()))?;
    root_for_executable(&exe)
        .with_context(|| format!("Executable path has no parent: {}", exe.display()))
}

fn main() -> Result<()> {
    // Bad arguments are reported but never turn into a failing exit status
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return Ok(());
        }
    };
    init_logging(args.verbose);

    let root = match args.root {
        Some(root) => root,
        None => executable_root().unwrap_or_else(|err| {
            warn!("{:#}; scanning the current directory instead", err);
            PathBuf::from(".")
        }),
    };

    let options = ScanOptions {
        dry_run: args.dry_run,
    };

    let mut stdout_open = true;
    let report = scan_tree(&root, &args.exclude, options, |path| {
        if stdout_open && writeln!(io::stdout().lock(), "{}", path.display()).is_err() {
            // Reader went away (e.g. `| head`); keep cleaning, stop listing
            debug!("stdout closed, no longer listing cleaned files");
            stdout_open = false;
        }
    });

    let count = report.modified_count();
    if count > 0 {
        let verb = if args.dry_run { "Would clean" } else { "Cleaned" };
        let _ = writeln!(io::stderr(), "{} {} file(s).", verb, count);
    }

    Ok(())
}
