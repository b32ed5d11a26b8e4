//! Type definitions for the Path Index.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice;

/// A single step in a [`Path`].
///
/// A string key addresses an object member, an integer index addresses an
/// array element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl PathStep {
    /// Returns the key if this step addresses an object member.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathStep::Key(key) => Some(key),
            PathStep::Index(_) => None,
        }
    }

    /// Returns the index if this step addresses an array element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Key(_) => None,
            PathStep::Index(idx) => Some(*idx),
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, PathStep::Key(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }

    /// Short name of the step kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PathStep::Key(_) => "key",
            PathStep::Index(_) => "index",
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => write!(f, "{key:?}"),
            PathStep::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<&String> for PathStep {
    fn from(key: &String) -> Self {
        PathStep::Key(key.clone())
    }
}

impl From<usize> for PathStep {
    fn from(idx: usize) -> Self {
        PathStep::Index(idx)
    }
}

/// An ordered sequence of [`PathStep`]s addressing a nested location.
///
/// The empty path addresses the root. A path may carry the "omit if null"
/// qualifier, which tells writers to drop the key instead of writing an
/// explicit `null`. The qualifier does not take part in equality.
#[derive(Debug, Clone, Default)]
pub struct Path {
    steps: Vec<PathStep>,
    omit_null: bool,
}

impl Path {
    /// The root path (no steps).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self {
            steps,
            omit_null: false,
        }
    }

    /// Parse a dotted key path such as `data.users.0.name`.
    ///
    /// All-digit components become [`PathStep::Index`]. The empty string is
    /// the root path.
    pub fn dotted(text: &str) -> Self {
        Self::from_steps(crate::util::parse_dotted(text))
    }

    /// Parse a JSON Pointer (RFC 6901) such as `/data/users/0/name`.
    pub fn pointer(pointer: &str) -> Self {
        Self::from_steps(crate::util::parse_json_pointer(pointer))
    }

    /// Mark the path so that writers skip the key when the value is null.
    #[must_use]
    pub fn omitting_null(mut self) -> Self {
        self.omit_null = true;
        self
    }

    pub fn omits_null(&self) -> bool {
        self.omit_null
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, PathStep> {
        self.steps.iter()
    }

    pub fn first(&self) -> Option<&PathStep> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn push(&mut self, step: impl Into<PathStep>) {
        self.steps.push(step.into());
    }

    /// Returns a new path with `step` appended.
    #[must_use]
    pub fn child(&self, step: impl Into<PathStep>) -> Self {
        let mut out = self.clone();
        out.push(step);
        out
    }

    /// Returns a new path with all steps of `other` appended.
    #[must_use]
    pub fn join(&self, other: &Path) -> Self {
        let mut out = self.clone();
        out.steps.extend(other.steps.iter().cloned());
        out
    }

    pub fn into_steps(self) -> Vec<PathStep> {
        self.steps
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.steps == other.steps
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.steps.hash(state);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::util::format_json_pointer(&self.steps))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self::from_steps(iter.into_iter().collect())
    }
}

impl From<PathStep> for Path {
    fn from(step: PathStep) -> Self {
        Self::from_steps(vec![step])
    }
}

impl From<&str> for Path {
    fn from(key: &str) -> Self {
        Self::from(PathStep::from(key))
    }
}

impl From<String> for Path {
    fn from(key: String) -> Self {
        Self::from(PathStep::Key(key))
    }
}

impl From<&String> for Path {
    fn from(key: &String) -> Self {
        Self::from(PathStep::from(key))
    }
}

impl From<usize> for Path {
    fn from(idx: usize) -> Self {
        Self::from(PathStep::Index(idx))
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Self::from_steps(steps)
    }
}

impl From<&[PathStep]> for Path {
    fn from(steps: &[PathStep]) -> Self {
        Self::from_steps(steps.to_vec())
    }
}

impl<T: Into<PathStep>, const N: usize> From<[T; N]> for Path {
    fn from(steps: [T; N]) -> Self {
        steps.into_iter().map(Into::into).collect()
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

/// Build a [`Path`] from literal steps.
///
/// ```
/// use jsonmap_path::{path, PathStep};
///
/// let p = path!["data", "users", 1, "name"];
/// assert_eq!(p.len(), 4);
/// assert_eq!(p.steps()[2], PathStep::Index(1));
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($step:expr),+ $(,)?) => {
        $crate::Path::from_steps(vec![$($crate::PathStep::from($step)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_accessors() {
        let key = PathStep::from("name");
        assert_eq!(key.as_key(), Some("name"));
        assert_eq!(key.as_index(), None);
        assert_eq!(key.kind(), "key");

        let idx = PathStep::from(3);
        assert_eq!(idx.as_index(), Some(3));
        assert!(idx.is_index());
        assert_eq!(idx.kind(), "index");
    }

    #[test]
    fn test_single_step_literals() {
        assert_eq!(Path::from("a.b").steps(), &[PathStep::Key("a.b".into())]);
        assert_eq!(Path::from(7).steps(), &[PathStep::Index(7)]);
    }

    #[test]
    fn test_omit_null_ignored_by_equality() {
        let plain = path!["nick"];
        let omitting = path!["nick"].omitting_null();
        assert!(omitting.omits_null());
        assert!(!plain.omits_null());
        assert_eq!(plain, omitting);
    }

    #[test]
    fn test_child_and_join() {
        let base = path!["data"];
        let users = base.child("users");
        assert_eq!(users, path!["data", "users"]);
        assert_eq!(users.join(&path![0, "name"]), path!["data", "users", 0, "name"]);
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_display_is_pointer() {
        assert_eq!(path!["a/b", 0].to_string(), "/a~1b/0");
        assert_eq!(Path::root().to_string(), "");
    }

    #[test]
    fn test_from_array() {
        assert_eq!(Path::from(["a", "b"]), path!["a", "b"]);
    }
}
