//! Structural paths locating values within a JSON document.
//!
//! A path is a sequence of [`PathComponent`]s (keys for objects, indices for
//! arrays) starting at the document root. The first element of a top-level
//! array has path `[PathComponent::Index(0)]`. Paths identify where boundary
//! events occurred and where the caller's target array lives.

use crate::error::ConfigError;

/// A component in the path to a JSON value.
///
/// Paths are sequences of keys or indices (for objects and arrays,
/// respectively) used in [`Boundary`](crate::Boundary) events to indicate the
/// location of a value within a JSON document.
///
/// # Examples
///
/// ```
/// use jsonpluck::PathComponent;
///
/// let key = PathComponent::Key("foo".to_string());
/// assert_eq!(key.as_key(), Some(&"foo".to_string()));
///
/// let idx = PathComponent::Index(3);
/// assert_eq!(idx.as_index(), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// An object member, identified by its key.
    Key(String),
    /// An array element, identified by its zero-based index.
    Index(usize),
}

/// An ordered sequence of path components relative to the document root.
///
/// Two paths are equal iff their component sequences are equal element-wise.
pub type Path = Vec<PathComponent>;

// Convenient conversions so users can write `path![0, "foo"]` etc.
macro_rules! impl_from_int_for_pathcomponent {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PathComponent {
                fn from(i: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation)]
                    PathComponent::Index(i as usize)
                }
            }
        )*
    };
}

impl_from_int_for_pathcomponent!(u8, u16, u32, u64, usize);

impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        Self::Key(s.to_string())
    }
}

impl From<String> for PathComponent {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

#[doc(hidden)]
/// Conversion helper backing the [`path!`](crate::path!) macro.
pub trait PathComponentFrom<T> {
    /// Convert `value` into a [`PathComponent`].
    fn from_path_component(value: T) -> PathComponent;
}

// use macro_rules to implement for i8..i64, u8..u64, isize, usize, &str and
// String
macro_rules! impl_integer_as_path_component {
    ($($t:ty),+) => {
        $(
            impl PathComponentFrom<$t> for PathComponent {
                fn from_path_component(value: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    PathComponent::Index(value as usize)
                }
            }
        )+
    };
}
impl_integer_as_path_component!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl PathComponentFrom<&str> for PathComponent {
    fn from_path_component(value: &str) -> Self {
        PathComponent::Key(value.to_string())
    }
}

impl PathComponentFrom<String> for PathComponent {
    fn from_path_component(value: String) -> Self {
        PathComponent::Key(value)
    }
}

impl PathComponent {
    #[must_use]
    /// Returns the index if this component is an index, otherwise `None`.
    pub fn as_index(&self) -> Option<&usize> {
        if let Self::Index(v) = self {
            Some(v)
        } else {
            None
        }
    }

    #[must_use]
    /// Returns the key if this component is a key, otherwise `None`.
    pub fn as_key(&self) -> Option<&String> {
        if let Self::Key(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

/// The caller-supplied location of the array to extract.
///
/// Accepts either an explicit component sequence (built with the
/// [`path!`](crate::path!) macro or a plain `Vec`) or a dotted string such as
/// `"a.2.b"`, where components that parse as non-negative integers become
/// array indices.
///
/// A dotted string cannot express a field literally named `"2"`; such a
/// component always normalizes to an index. Use the component form for keys
/// that look numeric.
///
/// # Examples
///
/// ```
/// use jsonpluck::{PathComponent, TargetPath, path};
///
/// let dotted = TargetPath::from("a.2.b");
/// assert_eq!(dotted.normalize().unwrap(), path!["a", 2, "b"]);
///
/// // A numeric-looking key needs the component form.
/// let explicit = TargetPath::from(path!["a", "2", "b"]);
/// assert_eq!(
///     explicit.normalize().unwrap()[1],
///     PathComponent::Key("2".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPath {
    /// An explicit component sequence; passes through normalization unchanged.
    Components(Path),
    /// A dotted string, split on `.` during normalization. The empty string
    /// denotes the document root.
    Dotted(String),
}

impl Default for TargetPath {
    /// The document root: the top-level value must itself be the array.
    fn default() -> Self {
        Self::Components(Vec::new())
    }
}

impl From<Path> for TargetPath {
    fn from(components: Path) -> Self {
        Self::Components(components)
    }
}

impl From<&str> for TargetPath {
    fn from(dotted: &str) -> Self {
        Self::Dotted(dotted.to_string())
    }
}

impl From<String> for TargetPath {
    fn from(dotted: String) -> Self {
        Self::Dotted(dotted)
    }
}

impl TargetPath {
    /// Resolve this target into a component sequence.
    ///
    /// Dotted strings are split on `.`; components that parse as non-negative
    /// integers become [`PathComponent::Index`], everything else becomes
    /// [`PathComponent::Key`]. The empty string resolves to the empty path.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyPathComponent`] if the dotted form contains an
    /// empty component (`"a..b"`, a leading or a trailing dot).
    pub fn normalize(self) -> Result<Path, ConfigError> {
        match self {
            Self::Components(components) => Ok(components),
            Self::Dotted(dotted) => {
                if dotted.is_empty() {
                    return Ok(Vec::new());
                }
                dotted
                    .split('.')
                    .map(|part| {
                        if part.is_empty() {
                            return Err(ConfigError::EmptyPathComponent {
                                path: dotted.clone(),
                            });
                        }
                        Ok(part.parse::<usize>().map_or_else(
                            |_| PathComponent::Key(part.to_string()),
                            PathComponent::Index,
                        ))
                    })
                    .collect()
            }
        }
    }
}

/// Returns `true` iff `path` locates the first element of the array at
/// `target`.
///
/// True iff `path` is one component longer than `target`, its last component
/// is `Index(0)`, and its prefix equals `target` element-wise. This is the
/// sole test used to confirm the start of the target array; the array's own
/// boundary need not have been observed, only its first element's. Note that
/// an object key `"0"` does not satisfy it.
///
/// # Examples
///
/// ```
/// use jsonpluck::{is_first_array_element, path};
///
/// assert!(is_first_array_element(&path!["a", 1, "b", 0], &path!["a", 1, "b"]));
/// assert!(!is_first_array_element(&path!["a", 1, "b", 1], &path!["a", 1, "b"]));
/// assert!(!is_first_array_element(&path!["a", "b", "0"], &path!["a", "b"]));
/// ```
#[must_use]
pub fn is_first_array_element(path: &[PathComponent], target: &[PathComponent]) -> bool {
    path.len() == target.len() + 1
        && path.last() == Some(&PathComponent::Index(0))
        && path[..target.len()] == *target
}
