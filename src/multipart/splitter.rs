//! Boundary-delimited part splitting

use super::boundary::Boundary;

/// Bytes of one part between two boundary occurrences, before header/body
/// separation.
pub type RawPart<'a> = &'a [u8];

/// Split a body on boundary occurrences into an ordered part sequence.
///
/// Preamble before the first occurrence and epilogue after the terminal
/// occurrence (boundary followed by `--`) are discarded. Zero occurrences
/// yield an empty sequence: the body may simply not be well-formed multipart
/// data, and that degrades gracefully rather than failing the request.
pub fn split_parts<'a>(body: &'a [u8], boundary: &Boundary) -> Vec<RawPart<'a>> {
    let needle = boundary.as_bytes();
    let mut parts = Vec::new();

    let Some(mut at) = find_subsequence(body, needle, 0) else {
        return parts;
    };

    loop {
        let after = at + needle.len();
        if body[after..].starts_with(b"--") {
            // Terminal boundary; everything past it is epilogue.
            break;
        }
        let Some(next) = find_subsequence(body, needle, after) else {
            // Unterminated tail; not between two occurrences, discard.
            break;
        };

        // The CRLF closing the boundary line belongs to the delimiter.
        let mut segment = &body[after..next];
        if let Some(rest) = segment.strip_prefix(b"\r\n") {
            segment = rest;
        }
        if !segment.is_empty() {
            parts.push(segment);
        }

        at = next;
    }

    parts
}

/// First occurrence of `needle` in `haystack` at or after `from`. Byte-wise;
/// the pattern is never treated as text.
pub(crate) fn find_subsequence(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() || from + needle.len() > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

// ============================================================================
// Tests
// ============================================================================
