//! Command-line argument definitions for `sloq`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Repair truncated slow-log JSON from stdin into clean records.
///
/// Reads raw slow-log lines from stdin, repairs the truncated `source`
/// JSON in each, and appends one JSON record per line to OUT_FILE.
/// Diagnostics go to stderr.
#[derive(Debug, Parser)]
#[command(name = "sloq", version, about, long_about = None)]
pub struct Cli {
    /// Minimum severity for diagnostics on stderr.
    ///
    /// A set `RUST_LOG` environment variable takes precedence.
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// File the parsed records are appended to, one JSON object per line.
    pub out_file: PathBuf,
}

/// Log verbosity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string fed to the tracing env filter.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
