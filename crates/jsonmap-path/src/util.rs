use crate::types::{Path, PathStep};
use crate::PathError;

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use jsonmap_path::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would turn into "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use jsonmap_path::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a string represents a valid non-negative integer array index.
///
/// Leading zeros are rejected so that `"01"` stays an object key.
///
/// ```
/// use jsonmap_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a string consists only of ASCII digits.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}

fn classify(component: String) -> PathStep {
    if is_valid_index(&component) {
        if let Ok(idx) = component.parse::<usize>() {
            return PathStep::Index(idx);
        }
    }
    PathStep::Key(component)
}

/// Parse a JSON Pointer string into path steps.
///
/// - Empty string returns the root (no steps)
/// - The leading `/` is stripped
/// - Each component is unescaped; canonical integers become index steps
///
/// ```
/// use jsonmap_path::{parse_json_pointer, PathStep};
///
/// assert!(parse_json_pointer("").is_empty());
/// assert_eq!(
///     parse_json_pointer("/users/0"),
///     vec![PathStep::Key("users".into()), PathStep::Index(0)]
/// );
/// ```
pub fn parse_json_pointer(pointer: &str) -> Vec<PathStep> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/')
        .map(|component| classify(unescape_component(component)))
        .collect()
}

/// Parse a dotted key path (`data.users.0.name`) into path steps.
///
/// ```
/// use jsonmap_path::{parse_dotted, PathStep};
///
/// assert_eq!(
///     parse_dotted("data.0"),
///     vec![PathStep::Key("data".into()), PathStep::Index(0)]
/// );
/// assert!(parse_dotted("").is_empty());
/// ```
pub fn parse_dotted(text: &str) -> Vec<PathStep> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('.')
        .map(|component| classify(component.to_string()))
        .collect()
}

/// Format path steps into a JSON Pointer string.
///
/// Returns an empty string for the root path.
pub fn format_json_pointer(steps: &[PathStep]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push('/');
        match step {
            PathStep::Key(key) => out.push_str(&escape_component(key)),
            PathStep::Index(idx) => out.push_str(&idx.to_string()),
        }
    }
    out
}

/// Format path steps as a dotted key path.
///
/// Keys that contain `.` cannot be expressed in this form.
///
/// # Errors
///
/// Returns [`PathError::InvalidPathStep`] for such keys.
pub fn format_dotted(steps: &[PathStep]) -> Result<String, PathError> {
    let mut parts = Vec::with_capacity(steps.len());
    for step in steps {
        match step {
            PathStep::Key(key) if key.contains('.') => return Err(PathError::InvalidPathStep),
            PathStep::Key(key) => parts.push(key.clone()),
            PathStep::Index(idx) => parts.push(idx.to_string()),
        }
    }
    Ok(parts.join("."))
}

/// Check if a path points to the root value.
pub fn is_root(path: &Path) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
///
/// ```
/// use jsonmap_path::{is_child, path};
///
/// assert!(is_child(&path!["foo"], &path!["foo", 0]));
/// assert!(!is_child(&path!["foo", 0], &path!["foo"]));
/// ```
pub fn is_child(parent: &Path, child: &Path) -> bool {
    if parent.len() >= child.len() {
        return false;
    }
    parent.steps() == &child.steps()[..parent.len()]
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns [`PathError::NoParent`] for the root path.
pub fn parent(path: &Path) -> Result<Path, PathError> {
    match path.steps().split_last() {
        Some((_, init)) => Ok(Path::from(init)),
        None => Err(PathError::NoParent),
    }
}
