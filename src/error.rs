//! Error types for the `sloq` application.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use thiserror::Error;

use crate::classify::ErrorKind;

/// Fatal outcomes of processing one line.
///
/// [`TooDeep`](Self::TooDeep) and [`NoRule`](Self::NoRule) are scoped to a
/// single input line: the record parser catches them, logs a warning, and
/// drops the line. [`MissingOffset`](Self::MissingOffset) means the decoder
/// broke its own message contract; it propagates to `main` and aborts the
/// run with exit code 2.
#[derive(Debug, Error)]
pub enum RepairError {
    /// The repair recursion ceiling was reached without valid JSON.
    #[error("too deep for string `{input}`, last error: {}", display_last(.last_error))]
    TooDeep {
        input: String,
        last_error: Option<ErrorKind>,
    },

    /// No rewrite rule matched the classified decoder error.
    #[error("failed to parse string `{input}`: {message}")]
    NoRule { input: String, message: String },

    /// The decoder message carried no `(char N)` offset suffix.
    #[error("decoder message without `(char N)` offset: {message}")]
    MissingOffset { message: String },
}

fn display_last(last: &Option<ErrorKind>) -> String {
    match last {
        Some(kind) => kind.to_string(),
        None => "none".to_string(),
    }
}
