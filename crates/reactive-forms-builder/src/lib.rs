//! Declarative construction of form trees
//!
//! Two entry points, both producing ordinary [`reactive_forms_core`] controls:
//!
//! - [`FormBuilder`]: nested [`ControlConfig`] values built in code, where a leaf
//!   is a bare value, a `(value, validators, async validators, update_on)` field
//!   description, or an already constructed control passed through unchanged.
//! - [`FormSchema`]: a serde-deserializable description of the same tree, with
//!   validators named by [`ValidatorSpec`] instead of given as closures.
//!
//! ## Example
//!
//! ```
//! use reactive_forms_builder::{ControlConfig, FormBuilder};
//! use reactive_forms_core::{ControlOptions, validators};
//! use serde_json::json;
//!
//! let form = FormBuilder::group(
//! 	[
//! 		("name", ControlConfig::field(json!(""), [validators::required()])),
//! 		("tags", ControlConfig::Array(vec![json!("a").into(), json!("b").into()])),
//! 	],
//! 	ControlOptions::default(),
//! );
//!
//! assert!(form.invalid());
//! assert_eq!(form.value(), json!({"name": "", "tags": ["a", "b"]}));
//! ```

pub mod builder;
pub mod schema;

pub use builder::{ControlConfig, FormBuilder};
pub use schema::{ArraySchema, ControlSchema, FormSchema, GroupSchema, SchemaOptions, ValidatorSpec};
