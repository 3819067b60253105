//! Leaf control

use super::{Children, Control, ControlKind};
use crate::options::{ControlOptions, UpdateOptions};
use crate::state::{FormState, UpdateOn};
use serde_json::Value;
use std::ops::Deref;

/// A single value holder.
///
/// Besides its committed value a leaf keeps a *pending* buffer fed by the
/// intake functions ([`on_change`](Self::on_change), [`on_blur`](Self::on_blur),
/// [`on_focus`](Self::on_focus)). Under the `blur` and `submit` strategies the
/// buffer is only committed on blur or on submit.
///
/// # Examples
///
/// ```
/// use reactive_forms_core::{ControlOptions, FormControl, UpdateOn};
/// use serde_json::json;
///
/// let name = FormControl::new(json!(""), ControlOptions::new().update_on(UpdateOn::Blur));
///
/// name.on_change(json!("abc"));
/// assert_eq!(name.value(), json!(""));
/// assert_eq!(name.pending_value(), json!("abc"));
///
/// name.on_blur();
/// assert_eq!(name.value(), json!("abc"));
/// assert!(name.touched() && name.dirty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FormControl(Control);

impl FormControl {
	/// Creates a leaf from a plain value or a boxed `{value, disabled}` state.
	pub fn new(state: impl Into<FormState>, options: ControlOptions) -> Self {
		let state = state.into();
		let control = Control::from_parts(ControlKind::Leaf, Children::Leaf, options, state.clone());
		if state.is_disabled() {
			control.state_mut().status = crate::ControlStatus::Disabled;
		}
		control.update_value_and_validity(UpdateOptions {
			only_self: true,
			emit_event: false,
		});
		Self(control)
	}

	pub(crate) fn from_control(control: Control) -> Self {
		Self(control)
	}

	pub fn control(&self) -> &Control {
		&self.0
	}

	pub fn into_control(self) -> Control {
		self.0
	}

	/// Uncommitted input, equal to the value whenever nothing is buffered.
	pub fn pending_value(&self) -> Value {
		self.0.state().pending_value.clone()
	}

	/// Whether buffered input is waiting for a commit.
	pub fn has_pending_change(&self) -> bool {
		self.0.state().pending_change
	}

	/// Focus flag.
	pub fn active(&self) -> bool {
		self.0.state().active
	}

	/// Intake for user edits.
	pub fn on_change(&self, value: Value) {
		if self.0.update_on() == UpdateOn::Change {
			if self.0.pristine() {
				self.0.mark_as_dirty(UpdateOptions::silent());
			}
			self.0.apply_value(value, UpdateOptions::default());
			return;
		}
		{
			let mut state = self.0.state_mut();
			state.pending_value = value;
			state.pending_change = true;
			state.pending_dirty = true;
		}
		self.0.inner.state_changes.emit(&());
	}

	/// Intake for focus loss.
	pub fn on_blur(&self) {
		self.0.state_mut().active = false;
		match self.0.update_on() {
			UpdateOn::Change => self.0.mark_as_touched(UpdateOptions::default()),
			UpdateOn::Blur => {
				let (pending_dirty, pending_change, pending_value) = {
					let mut state = self.0.state_mut();
					state.pending_touched = false;
					(
						std::mem::take(&mut state.pending_dirty),
						state.pending_change,
						state.pending_value.clone(),
					)
				};
				if !pending_change {
					self.0.mark_as_touched(UpdateOptions::default());
					return;
				}
				if pending_dirty {
					self.0.mark_as_dirty(UpdateOptions::silent());
				}
				self.0.mark_as_touched(UpdateOptions::silent());
				self.0.apply_value(pending_value, UpdateOptions::default());
			}
			UpdateOn::Submit => {
				self.0.state_mut().pending_touched = true;
				self.0.inner.state_changes.emit(&());
			}
		}
	}

	/// Intake for focus gain.
	pub fn on_focus(&self) {
		self.0.state_mut().active = true;
		self.0.inner.state_changes.emit(&());
	}
}

impl Control {
	pub(super) fn reset_leaf(&self, value: Option<Value>, opts: UpdateOptions) {
		let form_state = match value {
			Some(value) => FormState::from(value),
			None => self.state().initial.clone(),
		};
		let flags = opts.with_emit_event(false);
		if let FormState::Boxed { disabled, .. } = &form_state {
			if *disabled {
				self.disable(flags.with_only_self(true));
			} else {
				self.enable(flags.with_only_self(true));
			}
		}
		self.mark_as_pristine(flags);
		self.mark_as_untouched(flags);
		self.apply_value(form_state.into_value(), opts);
		self.state_mut().pending_change = false;
	}

	// Moves the pending buffer of a leaf with a deferred strategy into its value
	// without revalidating. Pending flag marks are applied silently.
	pub(super) fn commit_pending_leaf(&self) -> bool {
		if self.kind() != ControlKind::Leaf || self.update_on() == UpdateOn::Change {
			return false;
		}
		let (dirty, touched, change) = {
			let mut state = self.state_mut();
			let change = std::mem::take(&mut state.pending_change);
			if change {
				state.value = state.pending_value.clone();
			}
			(
				std::mem::take(&mut state.pending_dirty),
				std::mem::take(&mut state.pending_touched),
				change,
			)
		};
		if dirty {
			self.mark_as_dirty(UpdateOptions::silent());
		}
		if touched {
			self.mark_as_touched(UpdateOptions::silent());
		}
		change
	}
}

impl Deref for FormControl {
	type Target = Control;

	fn deref(&self) -> &Control {
		&self.0
	}
}

impl AsRef<Control> for FormControl {
	fn as_ref(&self) -> &Control {
		&self.0
	}
}

impl From<FormControl> for Control {
	fn from(control: FormControl) -> Self {
		control.0
	}
}

impl std::fmt::Debug for FormControl {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}
