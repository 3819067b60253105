//! Validation pipeline
//!
//! A [`Validator`] inspects a control synchronously and returns an error map or
//! `None`. An [`AsyncValidator`] returns a boxed local future resolving to the
//! same thing; the control tree owns cancellation of that future (see
//! [`Control::update_value_and_validity`](crate::Control::update_value_and_validity)).
//!
//! Error maps are plain JSON objects keyed by error kind. The detail payload is
//! opaque to the core.
//!
//! ## Built-in validators
//!
//! | Constructor | Error kind | Passes empty values |
//! |-------------|------------|---------------------|
//! | [`required`] | `required` | no |
//! | [`required_true`] | `required` | no |
//! | [`email`] | `email` | yes |
//! | [`min`] / [`max`] | `min` / `max` | yes |
//! | [`min_length`] / [`max_length`] | `minLength` / `maxLength` | yes |
//! | [`pattern`] | `pattern` | yes |

mod builtin;
mod compose;

pub use builtin::{
	email, is_empty_input_value, max, max_length, min, min_length, parse_float, pattern,
	pattern_regex, required, required_true,
};
pub use compose::{compose, compose_async, merge_errors};

use crate::control::Control;
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// Error kind → opaque detail.
pub type ValidationErrors = Map<String, Value>;

/// Future returned by an async validator.
pub type AsyncValidation = LocalBoxFuture<'static, Result<Option<ValidationErrors>, AsyncValidatorError>>;

/// Error kind recorded when an async validator fails instead of resolving.
pub const ASYNC_VALIDATOR_FAILED: &str = "asyncValidatorFailed";

/// Synchronous validator.
///
/// ```
/// use reactive_forms_core::{ControlOptions, FormControl, Validator};
/// use serde_json::json;
///
/// let no_admin = Validator::new(|control| {
/// 	(control.value() == json!("admin")).then(|| {
/// 		let mut errors = serde_json::Map::new();
/// 		errors.insert("reserved".into(), json!(true));
/// 		errors
/// 	})
/// });
///
/// let name = FormControl::new(json!("admin"), ControlOptions::new().validator(no_admin));
/// assert!(name.has_error("reserved"));
/// ```
#[derive(Clone)]
pub struct Validator(Rc<dyn Fn(&Control) -> Option<ValidationErrors>>);

impl Validator {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Control) -> Option<ValidationErrors> + 'static,
	{
		Self(Rc::new(f))
	}

	/// Runs the validator against `control`.
	pub fn validate(&self, control: &Control) -> Option<ValidationErrors> {
		(self.0)(control)
	}

	/// Whether two handles point at the same validator function.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for Validator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Validator(..)")
	}
}

/// Asynchronous validator.
///
/// The closure runs synchronously against the control and must capture whatever
/// it needs from it; the returned future is `'static`.
#[derive(Clone)]
pub struct AsyncValidator(Rc<dyn Fn(&Control) -> AsyncValidation>);

impl AsyncValidator {
	pub fn new<F, Fut>(f: F) -> Self
	where
		F: Fn(&Control) -> Fut + 'static,
		Fut: Future<Output = Result<Option<ValidationErrors>, AsyncValidatorError>> + 'static,
	{
		Self(Rc::new(move |control| f(control).boxed_local()))
	}

	/// Starts a validation of `control`.
	pub fn validate(&self, control: &Control) -> AsyncValidation {
		(self.0)(control)
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for AsyncValidator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("AsyncValidator(..)")
	}
}

/// Failure of an async validator (as opposed to a validation error).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AsyncValidatorError {
	message: String,
}

impl AsyncValidatorError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	/// Error map recorded on the control for this failure.
	pub fn to_errors(&self) -> ValidationErrors {
		let mut errors = ValidationErrors::new();
		errors.insert(ASYNC_VALIDATOR_FAILED.to_string(), Value::String(self.message.clone()));
		errors
	}
}

impl From<String> for AsyncValidatorError {
	fn from(message: String) -> Self {
		Self::new(message)
	}
}

impl From<&str> for AsyncValidatorError {
	fn from(message: &str) -> Self {
		Self::new(message)
	}
}

impl From<futures::channel::oneshot::Canceled> for AsyncValidatorError {
	fn from(err: futures::channel::oneshot::Canceled) -> Self {
		Self::new(err.to_string())
	}
}

/// Single-entry error map.
pub fn error(kind: impl Into<String>, detail: impl Into<Value>) -> ValidationErrors {
	let mut errors = ValidationErrors::new();
	errors.insert(kind.into(), detail.into());
	errors
}
