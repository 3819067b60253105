//! Form state management core
//!
//! This crate models a form as a tree of mutable controls:
//!
//! - [`FormControl`]: a leaf holding one opaque [`serde_json::Value`]
//! - [`FormGroup`]: named children, aggregated into a JSON object
//! - [`FormArray`]: ordered children, aggregated into a JSON array
//!
//! Every node tracks its value, validation [`ControlStatus`], error map and the
//! interaction flags (touched / pristine / submitted). Changes propagate up to the
//! root on every commit, and each control exposes three notification
//! [`Channel`]s (`value_changes`, `status_changes`, `state_changes`) that view
//! layers subscribe to.
//!
//! ## Architecture
//!
//! ```text
//!   FormGroup ─┬─ FormControl      (child.parent is a Weak back-reference)
//!              ├─ FormArray ─┬─ FormControl
//!              │             └─ FormControl
//!              └─ FormControl
//! ```
//!
//! All control operations run synchronously on one thread. Asynchronous validators
//! are the only suspension point: they are spawned on a [`futures::task::LocalSpawn`]
//! executor (see [`runtime`]) and cancelled when a newer validation starts.
//!
//! ## Example
//!
//! ```
//! use reactive_forms_core::{ControlOptions, FormControl, FormGroup, validators};
//! use serde_json::json;
//!
//! let form = FormGroup::new(
//! 	[
//! 		("name", FormControl::new(json!(""), ControlOptions::new().validator(validators::required()))),
//! 		("age", FormControl::new(json!(5), ControlOptions::new().validator(validators::min(18.0)))),
//! 	],
//! 	ControlOptions::default(),
//! );
//!
//! assert!(form.invalid());
//! assert!(form.has_error_at("required", "name"));
//!
//! form.set_value(json!({"name": "Jon", "age": 20}), Default::default()).unwrap();
//! assert!(form.valid());
//! ```

pub mod channel;
pub mod control;
pub mod error;
pub mod options;
pub mod runtime;
pub mod state;
pub mod validators;

pub use channel::{Channel, ListenerId};
pub use control::path::{ControlPath, PathSegment};
pub use control::{Control, ControlKind, FormArray, FormControl, FormGroup, WeakControl};
pub use error::{FormError, FormResult};
pub use options::{ControlOptions, UpdateOptions};
pub use state::{ControlStatus, FormState, UpdateOn};
pub use validators::{
	ASYNC_VALIDATOR_FAILED, AsyncValidation, AsyncValidator, AsyncValidatorError,
	ValidationErrors, Validator,
};

/// Re-export commonly used types
pub mod prelude {
	pub use super::channel::{Channel, ListenerId};
	pub use super::control::{Control, ControlKind, FormArray, FormControl, FormGroup};
	pub use super::error::{FormError, FormResult};
	pub use super::options::{ControlOptions, UpdateOptions};
	pub use super::state::{ControlStatus, FormState, UpdateOn};
	pub use super::validators::{self, AsyncValidator, ValidationErrors, Validator};
}
