//! Maps decoder failure messages to symbolic [`ErrorKind`]s.
//!
//! The repair rules dispatch on the decoder's human-readable diagnostics.
//! This module is the single place that knows the message vocabulary, so a
//! decoder reporting structured error codes could be swapped in by changing
//! only this mapping.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RepairError;

/// Symbolic category of a JSON parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnterminatedString,
    ExpectingObject,
    ExpectingColon,
    ExpectingPropertyName,
    OutOfBounds,
    ExpectingComma,
    NoJsonFound,
    ExpectingValue,
    /// Message carried an offset but matched no known phrase.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            ErrorKind::UnterminatedString => "Unterminated string",
            ErrorKind::ExpectingObject => "Expecting object",
            ErrorKind::ExpectingColon => "Expecting ':' delimiter",
            ErrorKind::ExpectingPropertyName => "Expecting property name",
            ErrorKind::OutOfBounds => "end is out of bounds",
            ErrorKind::ExpectingComma => "Expecting ',' delimiter",
            ErrorKind::NoJsonFound => "No JSON object could be decoded",
            ErrorKind::ExpectingValue => "Expecting value",
            ErrorKind::Unknown => "unknown error",
        };
        f.write_str(phrase)
    }
}

/// Known message phrases, most specific first. Some phrases are substrings
/// of longer diagnostics, so the scan order is load-bearing: the first
/// match wins.
const PHRASES: &[(&str, ErrorKind)] = &[
    ("Unterminated string", ErrorKind::UnterminatedString),
    ("Expecting object", ErrorKind::ExpectingObject),
    ("Expecting ':' delimiter", ErrorKind::ExpectingColon),
    ("Expecting property name", ErrorKind::ExpectingPropertyName),
    ("end is out of bounds", ErrorKind::OutOfBounds),
    ("Expecting ',' delimiter", ErrorKind::ExpectingComma),
    ("No JSON object could be decoded", ErrorKind::NoJsonFound),
    ("Expecting value", ErrorKind::ExpectingValue),
];

static CHAR_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(char (\d+)\)").expect("valid offset pattern"));

/// Classify a decoder failure message, returning the matched [`ErrorKind`]
/// and the character offset where parsing stopped.
///
/// Every decoder message must carry a `(char N)` suffix; a message without
/// one is a defect in the decoder contract and yields
/// [`RepairError::MissingOffset`], which callers must treat as fatal for
/// the whole run.
pub fn classify(message: &str) -> Result<(ErrorKind, usize), RepairError> {
    let missing = || RepairError::MissingOffset {
        message: message.to_string(),
    };
    let caps = CHAR_OFFSET.captures(message).ok_or_else(&missing)?;
    let col: usize = caps[1].parse().map_err(|_| missing())?;

    for (phrase, kind) in PHRASES {
        if message.contains(phrase) {
            return Ok((*kind, col));
        }
    }
    Ok((ErrorKind::Unknown, col))
}
