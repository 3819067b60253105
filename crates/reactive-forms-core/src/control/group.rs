//! Group control

use super::{Children, Control, ControlKind};
use crate::options::{ControlOptions, UpdateOptions};
use crate::state::FormState;
use indexmap::IndexMap;
use serde_json::Value;
use std::ops::Deref;

/// Named children aggregated into a JSON object.
///
/// Children are kept in insertion order, which is also the key order of
/// [`value`](Control::value).
///
/// # Examples
///
/// ```
/// use reactive_forms_core::{ControlOptions, FormControl, FormGroup, UpdateOptions};
/// use serde_json::json;
///
/// let form = FormGroup::new(
/// 	[
/// 		("a", FormControl::new(json!(1), ControlOptions::default())),
/// 		("b", FormControl::new(json!(2), ControlOptions::default())),
/// 	],
/// 	ControlOptions::default(),
/// );
/// assert_eq!(form.value(), json!({"a": 1, "b": 2}));
///
/// form.get("b").unwrap().disable(UpdateOptions::default());
/// assert_eq!(form.value(), json!({"a": 1}));
/// assert_eq!(form.get_raw_value(), json!({"a": 1, "b": 2}));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FormGroup(Control);

impl FormGroup {
	/// Duplicate names keep the first position and the last control; the
	/// displaced control is never attached.
	pub fn new<I, K, C>(controls: I, options: ControlOptions) -> Self
	where
		I: IntoIterator<Item = (K, C)>,
		K: Into<String>,
		C: Into<Control>,
	{
		let mut map: IndexMap<String, Control> = IndexMap::new();
		for (name, control) in controls {
			let name = name.into();
			if map.contains_key(&name) {
				tracing::warn!(name = %name, "duplicate control name, keeping the last one");
			}
			map.insert(name, control.into());
		}
		let control = Control::from_parts(
			ControlKind::Group,
			Children::Group(IndexMap::new()),
			options,
			FormState::Value(Value::Object(Default::default())),
		);
		for child in map.values() {
			control.adopt(child);
		}
		*control.children_mut() = Children::Group(map);
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

	/// Snapshot of the children in insertion order.
	pub fn controls(&self) -> Vec<(String, Control)> {
		match &*self.0.children_ref() {
			Children::Group(map) => map.iter().map(|(name, child)| (name.clone(), child.clone())).collect(),
			_ => Vec::new(),
		}
	}

	/// Child called `name`, enabled or not.
	pub fn get_control(&self, name: &str) -> Option<Control> {
		match &*self.0.children_ref() {
			Children::Group(map) => map.get(name).cloned(),
			_ => None,
		}
	}

	/// Whether an *enabled* child called `name` exists.
	pub fn contains(&self, name: &str) -> bool {
		self.get_control(name).is_some_and(|child| child.enabled())
	}

	pub fn len(&self) -> usize {
		match &*self.0.children_ref() {
			Children::Group(map) => map.len(),
			_ => 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Attaches `control` under `name` without revalidating.
	///
	/// If a child with that name already exists it is kept and returned instead.
	pub fn register_control(&self, name: impl Into<String>, control: impl Into<Control>) -> Control {
		let name = name.into();
		if let Some(existing) = self.get_control(&name) {
			return existing;
		}
		let control = control.into();
		self.0.adopt(&control);
		if let Children::Group(map) = &mut *self.0.children_mut() {
			map.insert(name, control.clone());
		}
		control
	}

	/// Attaches `control` under `name` and revalidates the group.
	pub fn add_control(&self, name: impl Into<String>, control: impl Into<Control>) -> Control {
		let name = name.into();
		tracing::debug!(name = %name, "adding control to group");
		let control = self.register_control(name, control);
		self.0.update_value_and_validity(UpdateOptions::default());
		self.0.notify_collection_change();
		control
	}

	/// Detaches the child called `name` and revalidates the group.
	pub fn remove_control(&self, name: &str) -> Option<Control> {
		let removed = match &mut *self.0.children_mut() {
			Children::Group(map) => map.shift_remove(name),
			_ => None,
		};
		if let Some(child) = &removed {
			tracing::debug!(name, "removing control from group");
			Control::release(child);
		}
		self.0.update_value_and_validity(UpdateOptions::default());
		self.0.notify_collection_change();
		removed
	}

	/// Replaces (or inserts) the child called `name` and revalidates the group.
	pub fn set_control(&self, name: impl Into<String>, control: impl Into<Control>) -> Option<Control> {
		let name = name.into();
		let control = control.into();
		self.0.adopt(&control);
		let previous = match &mut *self.0.children_mut() {
			Children::Group(map) => map.insert(name, control.clone()),
			_ => None,
		};
		if let Some(previous) = &previous
			&& *previous != control
		{
			Control::release(previous);
		}
		self.0.update_value_and_validity(UpdateOptions::default());
		self.0.notify_collection_change();
		previous
	}
}

impl Deref for FormGroup {
	type Target = Control;

	fn deref(&self) -> &Control {
		&self.0
	}
}

impl AsRef<Control> for FormGroup {
	fn as_ref(&self) -> &Control {
		&self.0
	}
}

impl From<FormGroup> for Control {
	fn from(group: FormGroup) -> Self {
		group.0
	}
}

impl std::fmt::Debug for FormGroup {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}
