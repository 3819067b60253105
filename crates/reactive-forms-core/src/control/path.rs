//! Paths to descendant controls

use std::fmt;

/// One step of a [`ControlPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
	/// Child name in a group. Also accepted by arrays when it parses as an index.
	Name(String),
	/// Child position in an array.
	Index(usize),
}

impl From<&str> for PathSegment {
	fn from(name: &str) -> Self {
		Self::Name(name.to_string())
	}
}

impl From<String> for PathSegment {
	fn from(name: String) -> Self {
		Self::Name(name)
	}
}

impl From<usize> for PathSegment {
	fn from(index: usize) -> Self {
		Self::Index(index)
	}
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => f.write_str(name),
			Self::Index(index) => write!(f, "{index}"),
		}
	}
}

/// Location of a descendant, relative to the control it is resolved against.
///
/// Strings are split on `.`, so `"address.street"` and
/// `vec!["address".into(), "street".into()]` are the same path.
///
/// ```
/// use reactive_forms_core::{ControlPath, PathSegment};
///
/// let path = ControlPath::from("items.0.name");
/// assert_eq!(path.segments().len(), 3);
///
/// let explicit = ControlPath::from(vec![PathSegment::from("items"), PathSegment::from(0_usize)]);
/// assert_eq!(explicit.to_string(), "items.0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ControlPath(Vec<PathSegment>);

impl ControlPath {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn segments(&self) -> &[PathSegment] {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Appends a segment.
	pub fn join(mut self, segment: impl Into<PathSegment>) -> Self {
		self.0.push(segment.into());
		self
	}
}

impl From<&str> for ControlPath {
	fn from(path: &str) -> Self {
		if path.is_empty() {
			return Self::default();
		}
		path.split('.').map(PathSegment::from).collect()
	}
}

impl From<String> for ControlPath {
	fn from(path: String) -> Self {
		Self::from(path.as_str())
	}
}

impl From<&String> for ControlPath {
	fn from(path: &String) -> Self {
		Self::from(path.as_str())
	}
}

impl From<usize> for ControlPath {
	fn from(index: usize) -> Self {
		Self(vec![PathSegment::Index(index)])
	}
}

impl From<PathSegment> for ControlPath {
	fn from(segment: PathSegment) -> Self {
		Self(vec![segment])
	}
}

impl From<Vec<PathSegment>> for ControlPath {
	fn from(segments: Vec<PathSegment>) -> Self {
		Self(segments)
	}
}

impl<const N: usize> From<[PathSegment; N]> for ControlPath {
	fn from(segments: [PathSegment; N]) -> Self {
		Self(segments.into())
	}
}

impl FromIterator<PathSegment> for ControlPath {
	fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl fmt::Display for ControlPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, segment) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(".")?;
			}
			write!(f, "{segment}")?;
		}
		Ok(())
	}
}
