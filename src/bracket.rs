//! Detects the most recently opened, still-unclosed `{` or `[`.

/// Return the closing character for the most recently opened bracket that
/// has no closer after it, or `None` when neither bracket type is open.
///
/// Purely textual: quotes are not tracked, so brackets inside string
/// values count. An array is open when the last `[` occurs after the last
/// `]` (or no `]` exists); objects likewise with `{`/`}`. When both are
/// open, the one opened later wins.
pub fn find_unclosed_bracket(s: &str) -> Option<char> {
    let last_open_sq = s.rfind('[');
    let last_close_sq = s.rfind(']');
    let last_open_br = s.rfind('{');
    let last_close_br = s.rfind('}');

    let array_open = matches!(last_open_sq, Some(o) if last_close_sq.is_none_or(|c| o > c));
    let object_open = matches!(last_open_br, Some(o) if last_close_br.is_none_or(|c| o > c));

    match (array_open, object_open) {
        (true, false) => Some(']'),
        (false, true) => Some('}'),
        (true, true) => {
            if last_open_br > last_open_sq {
                Some('}')
            } else {
                Some(']')
            }
        }
        (false, false) => None,
    }
}
