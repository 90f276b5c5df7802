//! Content-Disposition parsing and part classification
//!
//! A small explicit parser over the header-value grammar: `;`-separated
//! segments, each either a bare token (`form-data`) or `attr=value` with an
//! optionally double-quoted value. Malformed segments degrade to absent
//! attributes; nothing in here can fail.

use super::part::HeaderMap;

/// Structured view of a `content-disposition` header value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Disposition {
    pub name: Option<String>,
    pub filename: Option<String>,
}

impl Disposition {
    pub fn parse(value: &str) -> Self {
        let mut disposition = Self::default();
        for segment in value.split(';') {
            let Some((key, raw)) = segment.split_once('=') else {
                // Bare token such as `form-data`.
                continue;
            };
            let attr = unquote(raw.trim());
            match key.trim().to_ascii_lowercase().as_str() {
                "name" => disposition.name = Some(attr),
                "filename" => disposition.filename = Some(attr),
                _ => {}
            }
        }
        disposition
    }
}

/// Strip one layer of surrounding double quotes.
fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}

/// How a decoded part participates in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKind {
    /// Carries a `filename=` attribute. An empty filename means the client
    /// submitted the field with no file selected; such parts are excluded
    /// from the batch, not treated as errors.
    File { field_name: String, filename: String },

    /// Plain text field; content is decoded as UTF-8.
    Field { name: String },

    /// No usable disposition name; dropped.
    Malformed,
}

/// Classify a decoded part by its `content-disposition` header.
pub fn classify(headers: &HeaderMap) -> PartKind {
    let Some(value) = headers.get("content-disposition") else {
        return PartKind::Malformed;
    };
    let disposition = Disposition::parse(value);
    let Some(name) = disposition.name else {
        return PartKind::Malformed;
    };
    match disposition.filename {
        Some(filename) => PartKind::File {
            field_name: name,
            filename,
        },
        None => PartKind::Field { name },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_disposition(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("content-disposition".to_string(), value.to_string());
        headers
    }

    #[test]
    fn test_parses_name_and_filename() {
        let d = Disposition::parse("form-data; name=\"file\"; filename=\"a.txt\"");
        assert_eq!(d.name.as_deref(), Some("file"));
        assert_eq!(d.filename.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_unquoted_values_accepted() {
        let d = Disposition::parse("form-data; name=note");
        assert_eq!(d.name.as_deref(), Some("note"));
        assert!(d.filename.is_none());
    }

    #[test]
    fn test_empty_filename_is_present_but_empty() {
        let d = Disposition::parse("form-data; name=\"file\"; filename=\"\"");
        assert_eq!(d.filename.as_deref(), Some(""));
    }

    #[test]
    fn test_attribute_names_case_insensitive() {
        let d = Disposition::parse("form-data; Name=\"x\"; FileName=\"y.png\"");
        assert_eq!(d.name.as_deref(), Some("x"));
        assert_eq!(d.filename.as_deref(), Some("y.png"));
    }

    #[test]
    fn test_malformed_segments_skipped() {
        let d = Disposition::parse("form-data; ; =; name=\"ok\"");
        assert_eq!(d.name.as_deref(), Some("ok"));
    }

    #[test]
    fn test_classify_file_part() {
        let headers = headers_with_disposition("form-data; name=\"file\"; filename=\"a.txt\"");
        assert_eq!(
            classify(&headers),
            PartKind::File {
                field_name: "file".to_string(),
                filename: "a.txt".to_string()
            }
        );
    }

    #[test]
    fn test_classify_text_field() {
        let headers = headers_with_disposition("form-data; name=\"note\"");
        assert_eq!(
            classify(&headers),
            PartKind::Field {
                name: "note".to_string()
            }
        );
    }

    #[test]
    fn test_classify_without_name_is_malformed() {
        let headers = headers_with_disposition("form-data; filename=\"a.txt\"");
        assert_eq!(classify(&headers), PartKind::Malformed);
    }

    #[test]
    fn test_classify_without_disposition_is_malformed() {
        assert_eq!(classify(&HeaderMap::new()), PartKind::Malformed);
    }
}
