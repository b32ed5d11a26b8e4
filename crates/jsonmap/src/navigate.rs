//! Subscripting, traversal and in-place path writes on [`Value`].
//!
//! Reads never fail loudly: a failed step yields an `Error` value (or `Err`
//! from [`Value::lookup`]) and later steps are not attempted. Subscripting an
//! `Error` value hands back the same error.

use std::slice;

use indexmap::map;
use jsonmap_path::{validate_json_pointer, Path, PathStep};
use tracing::trace;

use crate::error::JsonError;
use crate::value::{Array, Object, Value};

// ── Reads ─────────────────────────────────────────────────────────────────

impl Value {
    /// Resolve a single step.
    ///
    /// # Errors
    ///
    /// - [`JsonError::KeyNotFound`] for a missing object key
    /// - [`JsonError::IndexOutOfBounds`] for an index past the array end
    /// - [`JsonError::WrongContainer`] when the step kind does not fit the variant
    /// - the carried error when `self` is an `Error` value
    pub fn lookup_step(&self, step: &PathStep) -> Result<&Value, JsonError> {
        match (self, step) {
            (Value::Error(err), _) => Err(err.clone()),
            (Value::Object(map), PathStep::Key(key)) => {
                map.get(key).ok_or_else(|| JsonError::KeyNotFound {
                    key: key.clone(),
                    object: Box::new(self.clone()),
                })
            }
            (Value::Array(items), PathStep::Index(idx)) => {
                items.get(*idx).ok_or_else(|| JsonError::IndexOutOfBounds {
                    index: *idx,
                    len: items.len(),
                    array: Box::new(self.clone()),
                })
            }
            (other, step) => Err(JsonError::WrongContainer {
                step: step.clone(),
                actual: other.type_name(),
            }),
        }
    }

    /// Resolve a path left to right, stopping at the first failing step.
    ///
    /// # Errors
    ///
    /// The error of the first failing step; see [`Value::lookup_step`].
    pub fn lookup(&self, path: &Path) -> Result<&Value, JsonError> {
        let mut current = self;
        for (depth, step) in path.iter().enumerate() {
            current = current.lookup_step(step).inspect_err(|err| {
                trace!(%path, depth, kind = err.kind(), "navigation stopped");
            })?;
        }
        Ok(current)
    }

    /// Subscript by a path, producing the child or an `Error` value.
    ///
    /// ```
    /// use jsonmap::{path, Value};
    ///
    /// let doc = Value::parse(r#"{"data": {"users": [{"name": "a"}, {"name": "b"}]}}"#);
    /// assert_eq!(doc.at(path!["data", "users", 1, "name"]).as_str(), Some("b"));
    /// assert!(doc.at(path!["data", "users", 5]).is_error());
    /// ```
    pub fn at(&self, path: impl Into<Path>) -> Value {
        match self.lookup(&path.into()) {
            Ok(child) => child.clone(),
            Err(err) => Value::Error(err),
        }
    }

    /// Subscript by a JSON Pointer string such as `/data/users/0`.
    ///
    /// A malformed pointer yields an `Error` value holding
    /// [`JsonError::Path`].
    pub fn pointer(&self, pointer: &str) -> Value {
        match validate_json_pointer(pointer) {
            Ok(()) => self.at(Path::pointer(pointer)),
            Err(err) => Value::Error(err.into()),
        }
    }

    /// Whether `path` resolves to a child.
    pub fn contains(&self, path: impl Into<Path>) -> bool {
        self.lookup(&path.into()).is_ok()
    }
}

// ── Writes ────────────────────────────────────────────────────────────────

/// Most nulls a single write may append before the addressed index.
pub const MAX_INDEX_GAP: usize = 1 << 16;

/// Make `current` a container fitting `step` (if it is null) and return the
/// slot the step addresses, inserting a null placeholder when absent.
fn slot<'v>(current: &'v mut Value, step: &PathStep) -> Result<&'v mut Value, JsonError> {
    if current.is_null() {
        *current = match step {
            PathStep::Key(_) => Value::Object(Object::new()),
            PathStep::Index(_) => Value::Array(Array::new()),
        };
    }
    match (current, step) {
        (Value::Object(map), PathStep::Key(key)) => {
            Ok(map.entry(key.clone()).or_insert(Value::Null))
        }
        (Value::Array(items), PathStep::Index(idx)) => {
            let len = items.len();
            if *idx >= len {
                let end = idx
                    .checked_add(1)
                    .filter(|_| idx - len <= MAX_INDEX_GAP)
                    .ok_or_else(|| JsonError::IndexOutOfBounds {
                        index: *idx,
                        len,
                        array: Box::new(Value::Array(items.clone())),
                    })?;
                items.resize(end, Value::Null);
            }
            Ok(&mut items[*idx])
        }
        (Value::Error(err), _) => Err(err.clone()),
        (other, step) => Err(JsonError::WrongContainer {
            step: step.clone(),
            actual: other.type_name(),
        }),
    }
}

impl Value {
    /// Write `value` at `path`, creating intermediate containers.
    ///
    /// Key steps create objects, index steps create arrays; gaps before an
    /// index are padded with nulls. Writing at the root replaces `self`.
    ///
    /// # Errors
    ///
    /// [`JsonError::WrongContainer`] when an existing non-null scalar sits on
    /// the path, [`JsonError::IndexOutOfBounds`] when an index lies more than
    /// [`MAX_INDEX_GAP`] past the array end, or the carried error of an
    /// `Error` value on the path.
    ///
    /// ```
    /// use jsonmap::{path, Value};
    ///
    /// let mut doc = Value::object();
    /// doc.set(&path!["data", "users", 0, "name"], Value::from("a")).unwrap();
    /// assert_eq!(doc.render().unwrap(), r#"{"data":{"users":[{"name":"a"}]}}"#);
    /// ```
    pub fn set(&mut self, path: &Path, value: Value) -> Result<(), JsonError> {
        let mut current = self;
        for step in path {
            current = slot(current, step)?;
        }
        *current = value;
        Ok(())
    }

    /// Remove and return the value at `path`.
    ///
    /// Array elements after a removed index shift down.
    ///
    /// # Errors
    ///
    /// Same as [`Value::lookup`] for the missing target or its parent.
    pub fn remove(&mut self, path: &Path) -> Result<Value, JsonError> {
        let Some((last, init)) = path.steps().split_last() else {
            return Ok(std::mem::take(self));
        };
        self.lookup(path)?;
        let mut parent = self;
        for step in init {
            parent = match (parent, step) {
                (Value::Object(map), PathStep::Key(key)) => map.get_mut(key.as_str()),
                (Value::Array(items), PathStep::Index(idx)) => items.get_mut(*idx),
                _ => None,
            }
            .ok_or_else(|| JsonError::message("path vanished during removal"))?;
        }
        let removed = match (parent, last) {
            (Value::Object(map), PathStep::Key(key)) => map.shift_remove(key.as_str()),
            (Value::Array(items), PathStep::Index(idx)) if *idx < items.len() => {
                Some(items.remove(*idx))
            }
            _ => None,
        };
        removed.ok_or_else(|| JsonError::message("path vanished during removal"))
    }
}

// ── Iteration ─────────────────────────────────────────────────────────────

enum Children<'a> {
    Array(slice::Iter<'a, Value>),
    Object(map::Iter<'a, String, Value>),
    Empty,
}

impl<'a> Children<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Children::Array(items.iter()),
            Value::Object(map) => Children::Object(map.iter()),
            _ => Children::Empty,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Children::Array(it) => it.size_hint(),
            Children::Object(it) => it.size_hint(),
            Children::Empty => (0, Some(0)),
        }
    }
}

/// Lazy iterator over the children of a container.
///
/// Object children lose their keys; use [`Value::entries`] to keep them.
pub struct Iter<'a> {
    inner: Children<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Children::Array(it) => it.next(),
            Children::Object(it) => it.next().map(|(_, val)| val),
            Children::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Lazy iterator over `(step, child)` pairs.
///
/// Objects yield key steps, arrays yield index steps.
pub struct Entries<'a> {
    inner: Children<'a>,
    index: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (PathStep, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Children::Array(it) => {
                let item = it.next()?;
                let idx = self.index;
                self.index += 1;
                Some((PathStep::Index(idx), item))
            }
            Children::Object(it) => it.next().map(|(key, val)| (PathStep::Key(key.clone()), val)),
            Children::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl Value {
    /// Children of an object or array; empty for every other variant.
    ///
    /// Each call starts a fresh pass.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: Children::of(self),
        }
    }

    /// Keyed children of an object or array; empty for every other variant.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            inner: Children::of(self),
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
