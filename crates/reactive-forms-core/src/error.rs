//! Usage errors
//!
//! Validation failures are data on a control (see [`crate::ValidationErrors`]) and
//! never show up here. [`FormError`] only covers programmer mistakes: a value whose
//! shape does not match the control tree, a reference to a child that does not
//! exist, or a validator that could not be built.

use serde_json::Value;

/// Result type for fallible control operations.
pub type FormResult<T> = Result<T, FormError>;

/// Structural mismatch between a control tree and what the caller supplied.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	/// Strict `set_value` on a group omitted an existing child.
	#[error("Must supply a value for form control with name: '{name}'")]
	MissingValue { name: String },
	/// Strict `set_value` on an array omitted an existing index.
	#[error("Must supply a value for form control at index: {index}")]
	MissingValueAtIndex { index: usize },
	/// A name did not resolve to a child of the group.
	#[error("Cannot find form control with name: {name}")]
	NoControl { name: String },
	/// An index did not resolve to a child of the array.
	#[error("Cannot find form control at index {index}")]
	NoControlAtIndex { index: usize },
	/// A container was handed a value of the wrong JSON shape.
	#[error("{control} expects {expected}, got: {found}")]
	UnexpectedValue {
		control: &'static str,
		expected: &'static str,
		found: String,
	},
	/// A `pattern` validator could not be compiled.
	#[error("Invalid validation pattern '{pattern}': {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
	/// A declarative form description was malformed.
	#[error("Invalid form schema: {0}")]
	Schema(String),
}

impl FormError {
	pub(crate) fn unexpected(control: &'static str, expected: &'static str, found: &Value) -> Self {
		Self::UnexpectedValue {
			control,
			expected,
			found: json_kind(found).to_string(),
		}
	}
}

impl From<serde_json::Error> for FormError {
	fn from(err: serde_json::Error) -> Self {
		Self::Schema(err.to_string())
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
