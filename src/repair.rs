//! The truncation repair engine.
//!
//! Slow-log truncation cuts JSON mid-string, mid-key, mid-number, or
//! mid-structure. Each shape shows up as a recognizable decoder
//! diagnostic, so the engine classifies each failed parse, applies one
//! textual rewrite, and tries again until the input parses, the depth
//! ceiling is hit, or no rule matches. The rule set is the product of
//! trial and error against real slow-log output; the priority order is
//! load-bearing.

use crate::bracket::find_unclosed_bracket;
use crate::classify::{ErrorKind, classify};
use crate::decoder::decode;
use crate::error::RepairError;

/// Mutations beyond this many recursive steps fail the line.
const MAX_DEPTH: u32 = 10;

/// Repair-step memory threaded through the recursion.
///
/// `last_error` feeds the comma tie-break: repeated comma complaints mean
/// the structure itself was cut, so the engine stops inserting separators
/// and force-closes instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepairState {
    pub depth: u32,
    pub last_error: Option<ErrorKind>,
}

/// Repair `s` until it parses as JSON, and return the parsed value.
///
/// Already-valid input is returned unmutated. Fails with
/// [`RepairError::TooDeep`] past ten mutations and
/// [`RepairError::NoRule`] when the classified error matches no rewrite.
pub fn repair(s: &str) -> Result<serde_json::Value, RepairError> {
    repair_step(s.to_string(), RepairState::default())
}

fn repair_step(s: String, state: RepairState) -> Result<serde_json::Value, RepairError> {
    if state.depth > MAX_DEPTH {
        return Err(RepairError::TooDeep {
            input: s,
            last_error: state.last_error,
        });
    }

    let err = match decode(&s) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let message = err.to_string();
    let (kind, col) = classify(&message)?;
    tracing::debug!(
        string = %s,
        error = %message,
        depth = state.depth,
        last = ?state.last_error,
        "repair attempt failed"
    );

    let Some(next) = apply_rule(&s, kind, col, state.last_error) else {
        return Err(RepairError::NoRule { input: s, message });
    };
    repair_step(
        next,
        RepairState {
            depth: state.depth + 1,
            last_error: Some(kind),
        },
    )
}

/// Apply the single highest-priority rewrite for one classified failure.
///
/// Returns `None` when no rule matches. Offsets and lengths are counted
/// in characters to stay consistent with the decoder's `(char N)`
/// positions.
pub fn apply_rule(s: &str, kind: ErrorKind, col: usize, last: Option<ErrorKind>) -> Option<String> {
    use ErrorKind::*;

    let len = s.chars().count();
    let last_char = s.chars().next_back();
    let open_bracket = find_unclosed_bracket(s);

    match kind {
        UnterminatedString => Some(format!("{s}\"")),
        // A bare trailing token where a key was expected: finish it as a
        // key end and close the object.
        ExpectingPropertyName if last_char.is_some_and(char::is_alphanumeric) => {
            Some(format!("{s}\"}}"))
        }
        ExpectingPropertyName if last_char == Some(',') => Some(drop_last_chars(s, 1)),
        // Error offset not at the very end: discard the dangling tail.
        ExpectingPropertyName if len.saturating_sub(col) > 1 => Some(truncate_chars(s, col)),
        OutOfBounds if s.ends_with(",\"") => Some(drop_last_chars(s, 2)),
        OutOfBounds if s.ends_with('"') => Some(drop_last_chars(s, 1)),
        OutOfBounds if s.ends_with(':') => Some(format!("{s}\"\"")),
        ExpectingColon => Some(format!("{s}:\"\"")),
        ExpectingValue => Some(format!("{s}\"\"")),
        // Any remaining kind with an open bracket gets the bracket closed
        // before the kind-specific fallbacks below.
        _ if open_bracket.is_some() => open_bracket.map(|c| format!("{s}{c}")),
        ExpectingObject if last_char == Some(',') => Some(drop_last_chars(s, 1)),
        ExpectingObject => Some(format!("{s}}}")),
        // Far from the end: a separator was genuinely dropped, splice one
        // in at the reported offset.
        ExpectingComma if len.saturating_sub(col) > 5 => Some(splice_comma(s, col)),
        // Repeated comma/key complaints mean the structure was cut, not a
        // separator; force-close instead of inserting more commas.
        ExpectingComma
            if matches!(
                last,
                Some(ExpectingComma | ExpectingPropertyName | UnterminatedString)
            ) =>
        {
            Some(format!("{s}}}"))
        }
        ExpectingComma => Some(format!("{s},")),
        NoJsonFound => Some(drop_last_chars(s, 1)),
        _ => None,
    }
}

fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn drop_last_chars(s: &str, n: usize) -> String {
    let len = s.chars().count();
    s.chars().take(len.saturating_sub(n)).collect()
}

fn splice_comma(s: &str, col: usize) -> String {
    let mut out = String::with_capacity(s.len() + 1);
    let mut spliced = false;
    for (i, c) in s.chars().enumerate() {
        if i == col {
            out.push(',');
            spliced = true;
        }
        out.push(c);
    }
    if !spliced {
        out.push(',');
    }
    out
}
