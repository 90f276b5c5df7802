//! Boundary resolution from the request content type

/// The `--`-prefixed boundary token. Used verbatim as a binary search
/// pattern over the body; never interpreted as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary(Vec<u8>);

impl Boundary {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extract the multipart boundary from a Content-Type header value.
///
/// Returns `None` when the value is not `multipart/form-data` or carries no
/// usable `boundary=` parameter. Callers treat that as "no multipart data",
/// not as an error.
pub fn resolve_boundary(content_type: &str) -> Option<Boundary> {
    let mut segments = content_type.split(';');
    let media_type = segments.next().unwrap_or("").trim();
    if !media_type.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }

    for segment in segments {
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        if !key.trim().eq_ignore_ascii_case("boundary") {
            continue;
        }
        let token = value.trim();
        let token = token
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(token);
        if token.is_empty() {
            continue;
        }

        let mut needle = Vec::with_capacity(token.len() + 2);
        needle.extend_from_slice(b"--");
        needle.extend_from_slice(token.as_bytes());
        return Some(Boundary(needle));
    }

    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_browser_style_boundary() {
        let ct = "multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW";
        let boundary = resolve_boundary(ct).unwrap();
        assert_eq!(
            boundary.as_bytes(),
            b"------WebKitFormBoundary7MA4YWxkTrZu0gW"
        );
    }

    #[test]
    fn test_strips_surrounding_quotes() {
        let ct = r#"multipart/form-data; boundary="simple-boundary""#;
        let boundary = resolve_boundary(ct).unwrap();
        assert_eq!(boundary.as_bytes(), b"--simple-boundary");
    }

    #[test]
    fn test_parameter_name_is_case_insensitive() {
        let ct = "multipart/form-data; Boundary=XYZ";
        let boundary = resolve_boundary(ct).unwrap();
        assert_eq!(boundary.as_bytes(), b"--XYZ");
    }

    #[test]
    fn test_missing_boundary_parameter_is_none() {
        assert!(resolve_boundary("multipart/form-data").is_none());
        assert!(resolve_boundary("multipart/form-data; charset=utf-8").is_none());
    }

    #[test]
    fn test_other_content_type_is_none() {
        assert!(resolve_boundary("application/json").is_none());
        assert!(resolve_boundary("application/x-www-form-urlencoded").is_none());
    }

    #[test]
    fn test_empty_boundary_token_is_none() {
        assert!(resolve_boundary("multipart/form-data; boundary=").is_none());
        assert!(resolve_boundary(r#"multipart/form-data; boundary="""#).is_none());
    }

    #[test]
    fn test_boundary_after_other_parameters() {
        let ct = "multipart/form-data; charset=utf-8; boundary=abc123";
        let boundary = resolve_boundary(ct).unwrap();
        assert_eq!(boundary.as_bytes(), b"--abc123");
    }
}
