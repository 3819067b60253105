//! Array control

use super::{Children, Control, ControlKind};
use crate::options::{ControlOptions, UpdateOptions};
use crate::state::FormState;
use serde_json::Value;
use std::ops::Deref;

/// Ordered children aggregated into a JSON array.
///
/// # Examples
///
/// ```
/// use reactive_forms_core::{ControlOptions, FormArray, FormControl};
/// use serde_json::json;
///
/// let items = FormArray::new(
/// 	[1, 2, 3].map(|n| FormControl::new(json!(n), ControlOptions::default())),
/// 	ControlOptions::default(),
/// );
///
/// items.remove_at(1);
/// assert_eq!(items.value(), json!([1, 3]));
/// assert_eq!(items.at(1).unwrap().value(), json!(3));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FormArray(Control);

impl FormArray {
	pub fn new<I, C>(controls: I, options: ControlOptions) -> Self
	where
		I: IntoIterator<Item = C>,
		C: Into<Control>,
	{
		let items: Vec<Control> = controls.into_iter().map(Into::into).collect();
		let control = Control::from_parts(
			ControlKind::Array,
			Children::Array(Vec::new()),
			options,
			FormState::Value(Value::Array(Vec::new())),
		);
		for child in &items {
			control.adopt(child);
		}
		*control.children_mut() = Children::Array(items);
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

	/// Snapshot of the children in order.
	pub fn controls(&self) -> Vec<Control> {
		self.0.children()
	}

	/// Child at `index`.
	pub fn at(&self, index: usize) -> Option<Control> {
		match &*self.0.children_ref() {
			Children::Array(items) => items.get(index).cloned(),
			_ => None,
		}
	}

	pub fn len(&self) -> usize {
		match &*self.0.children_ref() {
			Children::Array(items) => items.len(),
			_ => 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Appends `control` and revalidates the array.
	pub fn push(&self, control: impl Into<Control>) {
		let index = self.len();
		self.insert(index, control);
	}

	/// Inserts `control` at `index` (clamped to the length) and revalidates.
	pub fn insert(&self, index: usize, control: impl Into<Control>) {
		let control = control.into();
		self.0.adopt(&control);
		if let Children::Array(items) = &mut *self.0.children_mut() {
			let index = index.min(items.len());
			tracing::debug!(index, "inserting control into array");
			items.insert(index, control);
		}
		self.0.update_value_and_validity(UpdateOptions::default());
		self.0.notify_collection_change();
	}

	/// Removes the child at `index` and revalidates. Later children shift down.
	pub fn remove_at(&self, index: usize) -> Option<Control> {
		let removed = match &mut *self.0.children_mut() {
			Children::Array(items) if index < items.len() => Some(items.remove(index)),
			_ => None,
		};
		if let Some(child) = &removed {
			tracing::debug!(index, "removing control from array");
			Control::release(child);
		}
		self.0.update_value_and_validity(UpdateOptions::default());
		self.0.notify_collection_change();
		removed
	}

	/// Replaces the child at `index`, or appends when `index` is past the end.
	pub fn set_control(&self, index: usize, control: impl Into<Control>) -> Option<Control> {
		let control = control.into();
		self.0.adopt(&control);
		let previous = match &mut *self.0.children_mut() {
			Children::Array(items) if index < items.len() => Some(std::mem::replace(&mut items[index], control.clone())),
			Children::Array(items) => {
				items.push(control.clone());
				None
			}
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

impl Deref for FormArray {
	type Target = Control;

	fn deref(&self) -> &Control {
		&self.0
	}
}

impl AsRef<Control> for FormArray {
	fn as_ref(&self) -> &Control {
		&self.0
	}
}

impl From<FormArray> for Control {
	fn from(array: FormArray) -> Self {
		array.0
	}
}

impl std::fmt::Debug for FormArray {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::control::{FormControl, FormGroup};
	use crate::error::FormError;
	use crate::state::ControlStatus;
	use crate::validators::required;
	use rstest::{fixture, rstest};
	use serde_json::json;

	fn leaf(value: Value) -> FormControl {
		FormControl::new(value, ControlOptions::default())
	}

	#[fixture]
	fn numbers() -> FormArray {
		FormArray::new([leaf(json!(1)), leaf(json!(2)), leaf(json!(3))], ControlOptions::default())
	}

	#[rstest]
	fn test_remove_at_reindexes(numbers: FormArray) {
		// Act
		let removed = numbers.remove_at(1).unwrap();

		// Assert
		assert_eq!(numbers.value(), json!([1, 3]));
		assert_eq!(numbers.at(1).unwrap().value(), json!(3));
		assert_eq!(numbers.len(), 2);
		assert!(removed.parent().is_none());
	}

	#[rstest]
	fn test_remove_at_out_of_range(numbers: FormArray) {
		assert!(numbers.remove_at(9).is_none());
		assert_eq!(numbers.len(), 3);
	}

	#[rstest]
	fn test_push_and_insert(numbers: FormArray) {
		numbers.push(leaf(json!(4)));
		numbers.insert(0, leaf(json!(0)));
		numbers.insert(100, leaf(json!(5)));

		assert_eq!(numbers.value(), json!([0, 1, 2, 3, 4, 5]));
		assert_eq!(numbers.at(0).unwrap().parent().as_ref(), Some(numbers.control()));
	}

	#[rstest]
	fn test_set_control(numbers: FormArray) {
		let previous = numbers.set_control(0, leaf(json!(10))).unwrap();
		let appended = numbers.set_control(7, leaf(json!(99)));

		assert_eq!(previous.value(), json!(1));
		assert!(appended.is_none());
		assert_eq!(numbers.value(), json!([10, 2, 3, 99]));
	}

	#[rstest]
	#[case(json!([1, 2]), "MissingValueAtIndex")]
	#[case(json!([1, 2, 3, 4]), "NoControlAtIndex")]
	#[case(json!({"0": 1}), "UnexpectedValue")]
	fn test_set_value_strict_length(numbers: FormArray, #[case] value: Value, #[case] expected: &str) {
		// Act
		let err = numbers.set_value(value, UpdateOptions::default()).unwrap_err();

		// Assert
		let variant = match err {
			FormError::MissingValueAtIndex { index } => {
				assert_eq!(index, 2);
				"MissingValueAtIndex"
			}
			FormError::NoControlAtIndex { index } => {
				assert_eq!(index, 3);
				"NoControlAtIndex"
			}
			FormError::UnexpectedValue { .. } => "UnexpectedValue",
			other => panic!("unexpected error: {other}"),
		};
		assert_eq!(variant, expected);
		assert_eq!(numbers.value(), json!([1, 2, 3]));
	}

	#[rstest]
	fn test_patch_value_partial(numbers: FormArray) {
		numbers.patch_value(json!([7]), UpdateOptions::default());
		assert_eq!(numbers.value(), json!([7, 2, 3]));

		numbers.patch_value(json!([8, 9, 10, 11]), UpdateOptions::default());
		assert_eq!(numbers.value(), json!([8, 9, 10]));
	}

	#[rstest]
	fn test_reset_by_position(numbers: FormArray) {
		numbers.set_value(json!([4, 5, 6]), UpdateOptions::default()).unwrap();

		numbers.reset(Some(json!([9])), UpdateOptions::default());

		assert_eq!(numbers.value(), json!([9, 2, 3]));
		assert!(numbers.pristine());
	}

	#[rstest]
	fn test_disabled_items_leave_value() {
		// Arrange
		let array = FormArray::new(
			[
				Control::from(leaf(json!("a"))),
				Control::from(FormGroup::new([("x", leaf(json!(1)))], ControlOptions::default())),
			],
			ControlOptions::default(),
		);

		// Act
		array.at(0).unwrap().disable(UpdateOptions::default());

		// Assert
		assert_eq!(array.value(), json!([{"x": 1}]));
		assert_eq!(array.get_raw_value(), json!(["a", {"x": 1}]));
	}

	#[rstest]
	fn test_status_from_items() {
		let array = FormArray::new(
			[leaf(json!("ok")), FormControl::new(json!(""), ControlOptions::new().validator(required()))],
			ControlOptions::default(),
		);
		assert_eq!(array.status(), ControlStatus::Invalid);

		array.at(1).unwrap().set_value(json!("filled"), UpdateOptions::default()).unwrap();
		assert_eq!(array.status(), ControlStatus::Valid);
	}

	#[rstest]
	fn test_path_lookup_by_index_and_name() {
		let form = FormGroup::new(
			[("items", FormArray::new([leaf(json!("first")), leaf(json!("second"))], ControlOptions::default()))],
			ControlOptions::default(),
		);

		assert_eq!(form.get("items.1").unwrap().value(), json!("second"));
		assert!(form.get("items.2").is_none());
		assert!(form.get("items.x").is_none());
	}
}
