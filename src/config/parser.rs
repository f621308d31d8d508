//! Parser for the `KEY=VALUE` settings file format.
//!
//! One setting per line. Blank lines and lines starting with `#` are ignored,
//! only the first `=` separates key from value, and both halves are trimmed.
//! There is no quoting, escaping, or multi-line syntax.

use std::collections::HashMap;
use std::io::{self, BufRead};

/// Parse a single line into a `(key, value)` pair.
///
/// Returns `None` for blank lines, comments, lines without `=`, and lines
/// whose key is empty after trimming. An empty value is a valid entry.
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, value.trim()))
}

/// Parse settings from an in-memory string. Later duplicates overwrite earlier ones.
#[must_use]
pub fn parse_str(input: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for (idx, line) in input.lines().enumerate() {
        insert_line(&mut entries, idx + 1, line);
    }
    entries
}

/// Parse settings from a buffered reader.
///
/// Each line is decoded on its own; bytes that are not valid UTF-8 become
/// `U+FFFD` and the rest of the file is unaffected.
///
/// # Errors
///
/// Returns the underlying I/O error if the reader fails.
pub fn parse_reader<R: BufRead>(mut reader: R) -> io::Result<HashMap<String, String>> {
    let mut entries = HashMap::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        insert_line(&mut entries, line_no, &line);
    }
    Ok(entries)
}

fn insert_line(entries: &mut HashMap<String, String>, line_no: usize, line: &str) {
    if let Some((key, value)) = parse_line(line) {
        entries.insert(key.to_string(), value.to_string());
        return;
    }

    let trimmed = line.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('#') {
        // Never log the line itself, it may hold a password.
        tracing::debug!(line = line_no, "skipping malformed settings line");
    }
}
