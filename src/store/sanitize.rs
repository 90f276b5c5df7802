//! Filename sanitation policy

use uuid::Uuid;

/// Reduce a claimed filename to its final path segment and enforce the
/// stored-name policy.
///
/// Directory components are discarded before any other check runs, so a path
/// like `../../etc/passwd` is judged as `passwd` and can never escape the
/// target directory. Names containing whitespace or `#` are refused, as are
/// empty and dot-only segments.
pub fn sanitize_filename(claimed: &str) -> Option<String> {
    let segment = claimed.rsplit(['/', '\\']).next().unwrap_or(claimed);

    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    if segment.chars().any(|c| c.is_whitespace() || c == '#') {
        return None;
    }

    Some(segment.to_string())
}

/// Prefix a sanitized name with a short random token so repeated uploads of
/// the same filename never share a path.
pub fn disambiguated(name: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}_{}", &token[..8], name)
}

// ============================================================================
// Tests
// ============================================================================
