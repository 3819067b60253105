//! Re-render subscription for a mounted field

use reactive_forms_core::{Control, ListenerId};
use std::fmt;
use std::rc::Rc;

/// Keeps a render callback subscribed to the state-changed channel of one control.
///
/// The subscription is released on [`unmount`](Self::unmount), when switching to
/// another control, and on drop.
///
/// ```
/// use reactive_forms_binding::FieldBinding;
/// use reactive_forms_core::{ControlOptions, FormControl};
/// use serde_json::json;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let renders = Rc::new(Cell::new(0));
/// let counter = renders.clone();
/// let control = FormControl::new(json!(""), ControlOptions::default());
///
/// let mut binding = FieldBinding::new(move |_| counter.set(counter.get() + 1));
/// binding.mount(control.clone());
/// control.on_focus();
/// binding.unmount();
/// control.on_blur();
///
/// assert_eq!(renders.get(), 1);
/// ```
pub struct FieldBinding {
	render: Rc<dyn Fn(&Control)>,
	mounted: Option<(Control, ListenerId)>,
}

impl FieldBinding {
	pub fn new(render: impl Fn(&Control) + 'static) -> Self {
		Self {
			render: Rc::new(render),
			mounted: None,
		}
	}

	/// Subscribes to `control`, replacing any previous subscription.
	pub fn mount(&mut self, control: impl Into<Control>) {
		let control = control.into();
		self.unmount();

		let weak = control.downgrade();
		let render = Rc::clone(&self.render);
		let id = control.state_changes().subscribe(move |_| {
			if let Some(control) = weak.upgrade() {
				render(&control);
			}
		});
		tracing::debug!(kind = control.kind().name(), "field binding mounted");
		self.mounted = Some((control, id));
	}

	/// Moves the subscription to `control`. Does nothing when it is already the
	/// bound control.
	pub fn rebind(&mut self, control: impl Into<Control>) {
		let control = control.into();
		if self.control() == Some(&control) {
			return;
		}
		self.mount(control);
	}

	pub fn unmount(&mut self) {
		if let Some((control, id)) = self.mounted.take() {
			control.state_changes().unsubscribe(id);
			tracing::debug!(kind = control.kind().name(), "field binding unmounted");
		}
	}

	pub fn control(&self) -> Option<&Control> {
		self.mounted.as_ref().map(|(control, _)| control)
	}

	pub fn is_mounted(&self) -> bool {
		self.mounted.is_some()
	}
}

impl Drop for FieldBinding {
	fn drop(&mut self) {
		self.unmount();
	}
}

impl fmt::Debug for FieldBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldBinding")
			.field("control", &self.control())
			.finish_non_exhaustive()
	}
}
