//! Per-line orchestration: extract fields, repair the source, assemble
//! the output record.

use serde::Serialize;

use crate::error::RepairError;
use crate::extract::{extract_field, extract_level};
use crate::repair::repair;

/// One successfully parsed slow-log record.
///
/// Field order is the output key order.
#[derive(Debug, Serialize)]
pub struct ParsedRecord {
    pub took: Option<String>,
    pub level: Option<String>,
    pub source: serde_json::Value,
}

/// Terminal state for one input line.
#[derive(Debug)]
pub enum LineOutcome {
    /// Fields extracted and source repaired; the record is ready to emit.
    Parsed(ParsedRecord),
    /// `took` or `source` was absent or empty.
    Skipped,
    /// The repair engine gave up on the source fragment.
    Dropped,
}

/// Process one raw line into a [`LineOutcome`].
///
/// Per-line repair failures are logged and become
/// [`LineOutcome::Dropped`]; only a broken decoder-message contract
/// ([`RepairError::MissingOffset`]) propagates as `Err`.
pub fn parse_line(line: &str) -> Result<LineOutcome, RepairError> {
    let took = non_empty(extract_field(line, "took"));
    let level = extract_level(line);
    let source = non_empty(extract_field(line, "source"));

    let (Some(took), Some(source)) = (took, source) else {
        tracing::info!(line, "skipping message without took/source");
        return Ok(LineOutcome::Skipped);
    };

    // The raw line double-escapes the embedded JSON.
    let source = source.replace("\\\"", "\"");

    match repair(&source) {
        Ok(value) => Ok(LineOutcome::Parsed(ParsedRecord {
            took: Some(took.to_string()),
            level: level.map(str::to_string),
            source: value,
        })),
        Err(e @ (RepairError::TooDeep { .. } | RepairError::NoRule { .. })) => {
            tracing::warn!(error = %e, line, "failed to parse line");
            Ok(LineOutcome::Dropped)
        }
        Err(e) => Err(e),
    }
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.is_empty())
}
