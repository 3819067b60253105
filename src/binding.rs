//! View-layer helpers.
//!
//! This module provides access to reactive-forms-binding, the glue between a
//! control tree and whatever renders it.

pub use reactive_forms_binding::*;
