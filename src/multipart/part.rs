//! Part decoding: header block and content separation

use std::collections::HashMap;

use super::splitter::{find_subsequence, RawPart};

/// Lower-cased header names mapped to trimmed values, scoped to one part.
pub type HeaderMap = HashMap<String, String>;

/// One part with parsed headers and delimiter-free content.
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedPart<'a> {
    pub headers: HeaderMap,
    /// Never includes the line break that precedes the next boundary.
    pub content: &'a [u8],
}

/// Separate a raw part into its header map and content.
///
/// Returns `None` when the part has no header/body separator: such a part is
/// malformed and gets dropped, it never fails the batch. Header lines without
/// a colon are skipped.
pub fn decode_part(raw: RawPart<'_>) -> Option<DecodedPart<'_>> {
    let separator = find_subsequence(raw, b"\r\n\r\n", 0)?;
    let header_block = &raw[..separator];
    let mut content = &raw[separator + 4..];

    // Exactly one trailing CRLF is the delimiter artifact before the next
    // boundary; any break sequence further in is genuine payload.
    if let Some(stripped) = content.strip_suffix(b"\r\n") {
        content = stripped;
    }

    let mut headers = HeaderMap::new();
    for line in String::from_utf8_lossy(header_block).split("\r\n") {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    Some(DecodedPart { headers, content })
}

// ============================================================================
// Tests
// ============================================================================
