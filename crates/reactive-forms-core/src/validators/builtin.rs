use super::{Validator, error};
use crate::error::{FormError, FormResult};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

// Local part (dot-atoms or a quoted string) @ domain (bracketed IPv4 or labels
// ending in a 2+ letter TLD).
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

// Longest numeric prefix accepted by `parse_float`.
static FLOAT_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
		.expect("FLOAT_PREFIX_REGEX: invalid regex pattern")
});

/// `null`, an empty string and an empty array count as "no input".
pub fn is_empty_input_value(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.is_empty(),
		Value::Array(items) => items.is_empty(),
		_ => false,
	}
}

/// Lenient numeric reading of a value.
///
/// Numbers are taken as is. Strings yield their longest leading numeric prefix
/// after leading whitespace (`"42px"` reads as `42`). Everything else is `None`.
pub fn parse_float(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => {
			let s = s.trim_start();
			let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
			if unsigned.starts_with("Infinity") {
				let inf = if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
				return Some(inf);
			}
			FLOAT_PREFIX_REGEX
				.find(s)
				.and_then(|m| m.as_str().parse::<f64>().ok())
		}
		Value::Array(items) if items.len() == 1 => parse_float(&items[0]),
		_ => None,
	}
}

// String form of a value as matched by `email` and `pattern`.
fn as_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(|item| match item {
				Value::Null => String::new(),
				other => as_text(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => "[object Object]".to_string(),
		other => other.to_string(),
	}
}

fn input_length(value: &Value) -> Option<usize> {
	match value {
		Value::String(s) => Some(s.chars().count()),
		Value::Array(items) => Some(items.len()),
		_ => None,
	}
}

/// Rejects empty input with `{"required": true}`.
pub fn required() -> Validator {
	Validator::new(|control| {
		is_empty_input_value(&control.value()).then(|| error("required", true))
	})
}

/// Rejects anything but `true` with `{"required": true}`.
pub fn required_true() -> Validator {
	Validator::new(|control| (control.value() != Value::Bool(true)).then(|| error("required", true)))
}

/// Rejects malformed email addresses with `{"email": true}`.
pub fn email() -> Validator {
	Validator::new(|control| {
		let value = control.value();
		if is_empty_input_value(&value) {
			return None;
		}
		(!EMAIL_REGEX.is_match(&as_text(&value))).then(|| error("email", true))
	})
}

/// Rejects numbers below `min` with `{"min": {"min", "actual"}}`.
///
/// Values that do not read as a number pass.
pub fn min(min: f64) -> Validator {
	Validator::new(move |control| {
		let value = control.value();
		if is_empty_input_value(&value) {
			return None;
		}
		parse_float(&value)
			.filter(|actual| *actual < min)
			.map(|actual| error("min", json!({ "min": min, "actual": actual })))
	})
}

/// Rejects numbers above `max` with `{"max": {"max", "actual"}}`.
pub fn max(max: f64) -> Validator {
	Validator::new(move |control| {
		let value = control.value();
		if is_empty_input_value(&value) {
			return None;
		}
		parse_float(&value)
			.filter(|actual| *actual > max)
			.map(|actual| error("max", json!({ "max": max, "actual": actual })))
	})
}

/// Rejects strings or arrays shorter than `min_length`.
pub fn min_length(min_length: usize) -> Validator {
	Validator::new(move |control| {
		let value = control.value();
		if is_empty_input_value(&value) {
			return None;
		}
		input_length(&value)
			.filter(|length| *length < min_length)
			.map(|length| {
				error(
					"minLength",
					json!({ "requiredLength": min_length, "actualLength": length }),
				)
			})
	})
}

/// Rejects strings or arrays longer than `max_length`.
pub fn max_length(max_length: usize) -> Validator {
	Validator::new(move |control| {
		input_length(&control.value())
			.filter(|length| *length > max_length)
			.map(|length| {
				error(
					"maxLength",
					json!({ "requiredLength": max_length, "actualLength": length }),
				)
			})
	})
}

/// Requires the whole value to match `pattern`.
///
/// The pattern is anchored at both ends before compiling. An empty pattern
/// accepts everything.
///
/// ```
/// use reactive_forms_core::{ControlOptions, FormControl, validators};
/// use serde_json::json;
///
/// let zip = validators::pattern("[0-9]{5}").unwrap();
/// let control = FormControl::new(json!("1234a"), ControlOptions::new().validator(zip));
/// assert!(control.has_error("pattern"));
/// ```
pub fn pattern(pattern: &str) -> FormResult<Validator> {
	if pattern.is_empty() {
		return Ok(Validator::new(|_| None));
	}
	let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| FormError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})?;
	Ok(pattern_regex(regex))
}

/// Like [`pattern`] but with a prebuilt regex, used as is (no anchoring).
pub fn pattern_regex(regex: Regex) -> Validator {
	Validator::new(move |control| {
		let value = control.value();
		if is_empty_input_value(&value) {
			return None;
		}
		(!regex.is_match(&as_text(&value))).then(|| {
			error(
				"pattern",
				json!({ "requiredPattern": regex.as_str(), "actualValue": value }),
			)
		})
	})
}
