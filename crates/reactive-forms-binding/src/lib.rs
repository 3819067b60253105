//! View-layer helpers for reactive form controls
//!
//! The core crate knows nothing about rendering. A view layer drives it through
//! three seams provided here:
//!
//! - [`FieldBinding`]: re-render a component whenever its control reports a state change.
//! - [`input_props`]: map a leaf control onto the props of a native input element.
//! - [`attach_control`]: resolve the control a declared field should render, creating
//!   and attaching it to its parent when needed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  on_change / on_blur / on_focus  ┌──────────────┐
//! │  InputProps  │ ───────────────────────────────► │ FormControl  │
//! └──────────────┘                                  └──────┬───────┘
//!        ▲                                                 │ state_changes
//!        │ input_props()                                   ▼
//! ┌──────┴───────┐            render(&Control)      ┌──────────────┐
//! │     view     │ ◄─────────────────────────────── │ FieldBinding │
//! └──────────────┘                                  └──────────────┘
//! ```

pub mod attach;
pub mod binding;
pub mod props;

pub use attach::{FieldDecl, attach_control};
pub use binding::FieldBinding;
pub use props::{HostPlatform, InputKind, InputProps, input_props};
