//! Filename cleanup for the quoted `filename="..."` parameter.

/// Characters replaced with `_`. Backslash is escaped separately.
const PROBLEMATIC_CHARS: &[char] = &['/', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Sanitize a filename for use inside a `Content-Disposition` header.
///
/// Every `\` is doubled first, then each of `/ ? % * : | " < >` becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let mut sanitized = String::with_capacity(filename.len() + 8);
    for c in filename.chars() {
        match c {
            '\\' => sanitized.push_str("\\\\"),
            c if PROBLEMATIC_CHARS.contains(&c) => sanitized.push('_'),
            c => sanitized.push(c),
        }
    }
    sanitized
}

/// Last `/`-separated segment of `path`, ignoring trailing separators.
///
/// Backslashes are not treated as separators; they survive into the
/// filename and get escaped by [`sanitize_filename`].
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
