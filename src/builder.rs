//! Declarative construction of form trees.
//!
//! This module provides access to reactive-forms-builder: [`FormBuilder`] for
//! configurations written in code and [`FormSchema`] for serialized ones.
//!
//! ## Example
//!
//! ```rust
//! use reactive_forms::builder::FormSchema;
//!
//! let form = FormSchema::from_json(r#"{
//!     "controls": {
//!         "user": {"value": "", "options": {"validators": [{"type": "required"}]}}
//!     }
//! }"#)
//! .unwrap()
//! .build()
//! .unwrap();
//!
//! assert!(form.has_error_at("required", "user"));
//! ```

pub use reactive_forms_builder::*;
