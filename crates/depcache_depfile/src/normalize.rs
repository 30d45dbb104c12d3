//! Lexical path normalization.

/// Collapses `.` components, empty components and `dir/..` pairs in a
/// `/`-separated path without touching the file system.
///
/// Relative paths stay relative, and leading `..` components of a relative
/// path are preserved. `..` at the root of an absolute path is dropped.
pub fn normalize_path(path: &str) -> String {
    if !path.contains('/') {
        return path.to_string();
    }
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last().copied() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }
    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
