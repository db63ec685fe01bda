//! crates/syllabus_core/src/extract.rs
//!
//! Best-effort text recovery from raw PDF bytes.
//!
//! This is not a PDF parser: there is no cross-reference lookup and no stream
//! decompression. It sniffs the literal-string objects `( ... )` that uncompressed
//! PDFs use for displayed text, and falls back to a printable-ASCII scrub of the
//! whole buffer when too few of those are present.

use regex::Regex;
use std::sync::LazyLock;

/// Bytes converted per step when building the Latin-1 view of the buffer.
const LATIN1_CHUNK_SIZE: usize = 10_000;

/// Minimum number of literal-string groups before they are trusted as the text.
pub const MIN_LITERAL_GROUPS: usize = 10;

static LITERAL_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("literal-string pattern is valid"));

/// Extracts an approximation of the displayed text from `bytes`.
///
/// Never fails. Empty or unreadable input yields an empty or space-filled string;
/// callers judge quality by the length of the result.
pub fn extract_text(bytes: &[u8]) -> String {
    let latin1 = latin1_string(bytes);

    let groups: Vec<&str> = LITERAL_STRING
        .captures_iter(&latin1)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if groups.len() >= MIN_LITERAL_GROUPS {
        return groups.join(" ");
    }

    printable_ascii(bytes)
}

fn latin1_string(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.chunks(LATIN1_CHUNK_SIZE) {
        text.extend(chunk.iter().copied().map(char::from));
    }
    text
}

fn printable_ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| match c {
            '\n' | '\x20'..='\x7e' => c,
            _ => ' ',
        })
        .collect()
}
