use std::fs::File;
use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sloq::cli::Cli;
use sloq::record::{LineOutcome, parse_line};

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when sloq exits early.
    reset_sigpipe();

    let cli = Cli::parse();
    init_logging(&cli);

    let out = match File::create(&cli.out_file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("sloq: cannot open {}: {e}", cli.out_file.display());
            return ExitCode::from(1);
        }
    };
    let mut writer = BufWriter::new(out);

    let mut succeeded: u64 = 0;
    let mut failed: u64 = 0;

    let stdin = io::stdin();
    for line_result in stdin.lock().lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => {
                eprintln!("sloq: read error: {e}");
                return ExitCode::from(2);
            }
        };

        let outcome = match parse_line(&line) {
            Ok(outcome) => outcome,
            Err(e) => {
                // The decoder broke its message contract; this is a
                // defect, not a data-quality problem, so the run aborts.
                eprintln!("sloq: {e}");
                return ExitCode::from(2);
            }
        };

        let record = match outcome {
            LineOutcome::Parsed(record) => record,
            LineOutcome::Skipped | LineOutcome::Dropped => {
                failed += 1;
                continue;
            }
        };

        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("sloq: serialize error: {e}");
                return ExitCode::from(2);
            }
        };
        if let Err(e) = writeln!(writer, "{json}") {
            eprintln!("sloq: write error: {e}");
            return ExitCode::from(2);
        }
        succeeded += 1;
        tracing::info!(record = %json, "parsed");
    }

    if let Err(e) = writer.flush() {
        eprintln!("sloq: flush error: {e}");
        return ExitCode::from(2);
    }

    tracing::info!(succeeded, failed, "run complete");
    ExitCode::SUCCESS
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// Restoring `SIG_DFL` lets the OS handle the signal normally when
/// whatever reads sloq's stderr goes away.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
