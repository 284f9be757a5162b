//! `sloq` — repair truncated slow-log JSON into clean records.
//!
//! This library provides the core functionality for the `sloq` CLI tool.
//! Managed-service slow-log streams truncate long lines, cutting the
//! embedded query JSON mid-string, mid-array, mid-object, or mid-number.
//! `sloq` extracts the `took`, `level`, and `source` fields from each raw
//! line, drives an error-message-guided repair state machine over the
//! truncated JSON until it parses (or the attempt budget runs out), and
//! re-emits one clean JSON record per line.
//!
//! # Example
//!
//! ```
//! let value = sloq::repair(r#"{"query":{"match":{"user":"kim"#).unwrap();
//! assert_eq!(value["query"]["match"]["user"], "kim");
//! ```

pub mod bracket;
pub mod classify;
pub mod cli;
pub mod decoder;
pub mod error;
pub mod extract;
pub mod record;
pub mod repair;

// Re-export primary API types for convenience.
pub use bracket::find_unclosed_bracket;
pub use classify::{ErrorKind, classify};
pub use decoder::{DecodeError, decode};
pub use error::RepairError;
pub use extract::{extract_field, extract_level};
pub use record::{LineOutcome, ParsedRecord, parse_line};
pub use repair::repair;
