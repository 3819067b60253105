//! Control tree, validators and change notification.
//!
//! # Examples
//!
//! ```rust
//! use reactive_forms::core::validators::{self, Validator};
//! use reactive_forms::core::{Channel, ControlStatus};
//! ```

pub use reactive_forms_core::*;
