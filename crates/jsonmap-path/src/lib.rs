//! Path Index for jsonmap.
//!
//! A [`Path`] is an ordered sequence of [`PathStep`]s, each either a string
//! key or an integer index. Paths are built from literals, from the
//! [`path!`] macro, or parsed from dotted (`data.users.0`) and JSON Pointer
//! (`/data/users/0`, RFC 6901) text.
//!
//! # Example
//!
//! ```
//! use jsonmap_path::{path, Path, PathStep};
//!
//! let p: Path = "/data/users/1/name".parse().unwrap();
//! assert_eq!(p, path!["data", "users", 1, "name"]);
//! assert_eq!(Path::dotted("data.users.1.name"), p);
//! assert_eq!(p.to_string(), "/data/users/1/name");
//! assert_eq!(p.steps()[2], PathStep::Index(1));
//! ```

use std::str::FromStr;

use thiserror::Error;

pub mod types;
pub mod util;
pub mod validate;

pub use types::{Path, PathStep};
pub use util::{
    escape_component, format_dotted, format_json_pointer, is_child, is_integer, is_root,
    is_valid_index, parent, parse_dotted, parse_json_pointer, unescape_component,
};
pub use validate::{validate_json_pointer, validate_path, MAX_PATH_LENGTH, MAX_POINTER_LENGTH};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("NO_PARENT")]
    NoParent,
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("Path too long")]
    PathTooLong,
    #[error("Invalid path step")]
    InvalidPathStep,
}

impl FromStr for Path {
    type Err = PathError;

    /// Text starting with `/` is read as a JSON Pointer, anything else as a
    /// dotted key path.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let path = if text.starts_with('/') {
            validate_json_pointer(text)?;
            Path::pointer(text)
        } else {
            Path::dotted(text)
        };
        validate_path(&path)?;
        Ok(path)
    }
}

impl Path {
    /// Render as dotted text.
    ///
    /// # Errors
    ///
    /// Fails when a key contains `.`.
    pub fn to_dotted(&self) -> Result<String, PathError> {
        format_dotted(self.steps())
    }

    /// Parent of this path.
    ///
    /// # Errors
    ///
    /// Fails for the root path.
    pub fn parent(&self) -> Result<Path, PathError> {
        parent(self)
    }

    pub fn is_root(&self) -> bool {
        is_root(self)
    }

    pub fn is_child_of(&self, other: &Path) -> bool {
        is_child(other, self)
    }
}
