//! # Reactive Forms
//!
//! Form state management for Rust UI layers.
//!
//! A form is a tree of controls. Leaves hold a value; groups and arrays aggregate
//! their children. Every control tracks validity, interaction flags
//! (pristine/dirty, touched/untouched, submitted) and publishes its changes on
//! notification channels a view can subscribe to.
//!
//! ## Feature Flags
//!
//! - `builder` (default) - [`FormBuilder`](builder::FormBuilder) and serde-driven [`FormSchema`](builder::FormSchema)
//! - `binding` (default) - input-prop mapping and re-render subscriptions for views
//! - `tokio` - `TokioLocalSpawner` for async validators inside a `LocalSet`
//! - `full` - all of the above
//!
//! ## Example
//!
//! ```rust
//! use reactive_forms::prelude::*;
//! use serde_json::json;
//!
//! let form = FormGroup::new(
//!     [
//!         ("name", FormControl::new(json!(""), ControlOptions::new().validator(validators::required()))),
//!         ("age", FormControl::new(json!(5), ControlOptions::new().validator(validators::min(18.0)))),
//!     ],
//!     ControlOptions::default(),
//! );
//! assert_eq!(form.status(), ControlStatus::Invalid);
//!
//! form.set_value(json!({"name": "Jon", "age": 20}), UpdateOptions::default()).unwrap();
//! assert_eq!(form.status(), ControlStatus::Valid);
//! ```

pub mod core;

#[cfg(feature = "binding")]
pub mod binding;
#[cfg(feature = "builder")]
pub mod builder;

pub use reactive_forms_core::{
	Control, ControlKind, ControlOptions, ControlStatus, FormArray, FormControl, FormError, FormGroup, FormResult,
	FormState, UpdateOn, UpdateOptions,
};

pub mod prelude {
	pub use reactive_forms_core::prelude::*;

	#[cfg(feature = "binding")]
	pub use crate::binding::{FieldBinding, HostPlatform, InputKind, input_props};
	#[cfg(feature = "builder")]
	pub use crate::builder::{ControlConfig, FormBuilder, FormSchema};
}
