//! Positional field extraction from raw slow-log lines.
//!
//! The log line itself is not valid JSON, so fields are pulled out by
//! their bracket-delimited markers rather than by structured parsing.
//! This is deliberately separate from the JSON repair machinery; the two
//! operate on different malformed grammars.

/// Pull the content of a named, bracket-delimited field out of a raw line.
///
/// The content starts right after the first `name[` marker. The
/// terminator is the escaped `]"` boundary when one occurs past the
/// start, otherwise the first plain `]`. A missing marker or terminator
/// means the field is absent.
pub fn extract_field<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let marker = format!("{name}[");
    let start = line.find(&marker)? + marker.len();
    let rest = &line[start..];
    let end = match rest.find("]\"") {
        Some(i) => i,
        None => rest.find(']')?,
    };
    Some(&rest[..end])
}

/// Extract the severity between the second `[` and the following `]`.
///
/// The level field has no name marker; it is the second bracketed group
/// on the line (the first is the timestamp).
pub fn extract_level(line: &str) -> Option<&str> {
    let start = find_nth(line, "[", 2)? + 1;
    let end = line[start..].find(']')? + start;
    Some(&line[start..end])
}

/// Byte offset of the `n`-th occurrence of `needle` (1-based).
pub fn find_nth(haystack: &str, needle: &str, n: usize) -> Option<usize> {
    let mut at = haystack.find(needle)?;
    for _ in 1..n {
        let next = haystack[at + needle.len()..].find(needle)?;
        at += needle.len() + next;
    }
    Some(at)
}
