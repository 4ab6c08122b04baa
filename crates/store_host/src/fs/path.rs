//! Store-path normalization and query-string helpers.

/// Normalizes a store path: collapses duplicate slashes, guarantees a
/// leading slash, and drops any trailing slash except on the root.
pub fn normalize_store_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.trim().split('/') {
        if segment.is_empty() {
            continue;
        }
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Joins a child name onto a parent path, normalizing the result.
pub fn join_store_path(parent: &str, name: &str) -> String {
    normalize_store_path(&format!("{parent}/{name}"))
}

/// Returns the parent of a normalized store path; the root is its own
/// parent.
pub fn parent_store_path(path: &str) -> String {
    let normalized = normalize_store_path(path);
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Percent-encodes one query-string component.
///
/// Unreserved characters (RFC 3986) pass through; everything else is
/// encoded byte-wise, which matches how the backend decodes repeated `p`
/// parameters.
pub fn encode_query_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

/// Decodes a percent-encoded query-string component, treating `+` as a
/// space. Malformed escapes pass through unchanged.
pub fn decode_query_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                match (
                    bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                    bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
                ) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi * 16 + lo) as u8);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
