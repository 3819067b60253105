//! Status, update strategy and initial form state

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Validation status of a control.
///
/// `Disabled` takes precedence over every other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlStatus {
	#[default]
	Valid,
	Invalid,
	Pending,
	Disabled,
}

impl ControlStatus {
	/// Wire spelling, e.g. `"VALID"`.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Valid => "VALID",
			Self::Invalid => "INVALID",
			Self::Pending => "PENDING",
			Self::Disabled => "DISABLED",
		}
	}
}

impl fmt::Display for ControlStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// When a leaf commits user input into its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOn {
	/// Every interaction commits immediately.
	#[default]
	Change,
	/// Interactions are buffered until the field loses focus.
	Blur,
	/// Interactions are buffered until the owning form is submitted.
	Submit,
}

impl fmt::Display for UpdateOn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Change => "change",
			Self::Blur => "blur",
			Self::Submit => "submit",
		})
	}
}

/// Initial state of a leaf: a plain value or a boxed `{value, disabled}` pair.
///
/// `From<Value>` only recognises the boxed shape when the object has exactly the
/// two keys `value` and `disabled`. Anything else is kept as a literal value.
///
/// ```
/// use reactive_forms_core::FormState;
/// use serde_json::json;
///
/// let boxed = FormState::from(json!({"value": "x", "disabled": true}));
/// assert!(boxed.is_disabled());
///
/// let literal = FormState::from(json!({"value": "x", "disabled": true, "extra": 1}));
/// assert!(!literal.is_disabled());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
	Value(Value),
	Boxed { value: Value, disabled: bool },
}

impl FormState {
	/// Boxed state with an explicit disabled flag.
	pub fn boxed(value: impl Into<Value>, disabled: bool) -> Self {
		Self::Boxed {
			value: value.into(),
			disabled,
		}
	}

	pub fn value(&self) -> &Value {
		match self {
			Self::Value(value) | Self::Boxed { value, .. } => value,
		}
	}

	pub fn is_disabled(&self) -> bool {
		matches!(self, Self::Boxed { disabled: true, .. })
	}

	pub fn into_value(self) -> Value {
		match self {
			Self::Value(value) | Self::Boxed { value, .. } => value,
		}
	}
}

impl Default for FormState {
	fn default() -> Self {
		Self::Value(Value::Null)
	}
}

impl From<Value> for FormState {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) if is_boxed(&map) => {
				let disabled = map.get("disabled").is_some_and(truthy);
				let value = map.get("value").cloned().unwrap_or(Value::Null);
				Self::Boxed { value, disabled }
			}
			other => Self::Value(other),
		}
	}
}

impl From<Option<Value>> for FormState {
	fn from(value: Option<Value>) -> Self {
		value.map(Self::from).unwrap_or_default()
	}
}

impl From<&str> for FormState {
	fn from(value: &str) -> Self {
		Self::Value(Value::from(value))
	}
}

fn is_boxed(map: &Map<String, Value>) -> bool {
	map.len() == 2 && map.contains_key("value") && map.contains_key("disabled")
}

/// JavaScript-style truthiness, used for checkbox state and boxed `disabled`.
pub fn truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}
