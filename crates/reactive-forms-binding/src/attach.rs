//! Resolving the control behind a declared field

use reactive_forms_core::{Control, ControlKind, ControlOptions, FormArray, FormControl, FormGroup, FormState};

/// A field as declared by a view: what kind of control it renders and where
/// that control lives.
#[derive(Debug, Clone)]
pub struct FieldDecl {
	pub kind: ControlKind,
	pub name: Option<String>,
	pub index: Option<usize>,
	pub control: Option<Control>,
	pub state: FormState,
	pub options: ControlOptions,
}

impl FieldDecl {
	pub fn new(kind: ControlKind) -> Self {
		Self {
			kind,
			name: None,
			index: None,
			control: None,
			state: FormState::default(),
			options: ControlOptions::default(),
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn index(mut self, index: usize) -> Self {
		self.index = Some(index);
		self
	}

	pub fn control(mut self, control: impl Into<Control>) -> Self {
		self.control = Some(control.into());
		self
	}

	pub fn state(mut self, state: impl Into<FormState>) -> Self {
		self.state = state.into();
		self
	}

	pub fn options(mut self, options: ControlOptions) -> Self {
		self.options = options;
		self
	}

	fn create(&self) -> Control {
		let options = self.options.clone();
		match self.kind {
			ControlKind::Leaf => FormControl::new(self.state.clone(), options).into(),
			ControlKind::Group => FormGroup::new(Vec::<(String, Control)>::new(), options).into(),
			ControlKind::Array => FormArray::new(Vec::<Control>::new(), options).into(),
		}
	}
}

/// Returns the control `field` should render.
///
/// In order of precedence:
///
/// 1. An explicit `control` of the declared kind is used as is.
/// 2. A `name` adds the control to `parent`, which must be a group. An existing
///    child of that name is reused.
/// 3. A parent array receives the control at `index`, or at the end.
/// 4. Groups and arrays without a parent are created standalone.
///
/// Anything else is a wiring mistake in the view: it is logged and `None` is
/// returned.
pub fn attach_control(field: &FieldDecl, parent: Option<&Control>) -> Option<Control> {
	if let Some(control) = &field.control {
		if control.kind() == field.kind {
			return Some(control.clone());
		}
		tracing::warn!(
			expected = field.kind.name(),
			found = control.kind().name(),
			"field control has the wrong kind"
		);
		return None;
	}

	if let Some(name) = &field.name {
		let Some(parent) = parent else {
			tracing::warn!(name = %name, "named field has no parent control");
			return None;
		};
		let Some(group) = parent.to_form_group() else {
			tracing::warn!(
				name = %name,
				parent = parent.kind().name(),
				"named field requires a parent group, use an index inside arrays"
			);
			return None;
		};
		if let Some(existing) = group.get_control(name) {
			return Some(existing);
		}
		return Some(group.add_control(name.clone(), field.create()));
	}

	if let Some(array) = parent.and_then(Control::to_form_array) {
		let index = field.index.unwrap_or_else(|| array.len()).min(array.len());
		array.insert(index, field.create());
		return array.at(index);
	}

	match field.kind {
		ControlKind::Group | ControlKind::Array => Some(field.create()),
		ControlKind::Leaf => {
			tracing::warn!("leaf field needs a control, a name or a parent array");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn group() -> FormGroup {
		FormGroup::new(
			[("email", Control::from(FormControl::new(json!("a@b.c"), ControlOptions::default())))],
			ControlOptions::default(),
		)
	}

	#[rstest]
	fn test_explicit_control_of_matching_kind() {
		let control = FormControl::new(json!(1), ControlOptions::default());
		let field = FieldDecl::new(ControlKind::Leaf).control(control.clone());

		let attached = attach_control(&field, None);

		assert_eq!(attached.as_ref(), Some(control.control()));
	}

	#[rstest]
	fn test_explicit_control_of_wrong_kind() {
		let field = FieldDecl::new(ControlKind::Group).control(FormControl::new(json!(1), ControlOptions::default()));

		assert!(attach_control(&field, None).is_none());
	}

	#[rstest]
	fn test_named_field_is_added_to_parent_group() {
		// Arrange
		let form = group();
		let field = FieldDecl::new(ControlKind::Leaf).name("nickname").state(json!("jo"));

		// Act
		let attached = attach_control(&field, Some(form.control())).unwrap();

		// Assert
		assert_eq!(form.get_control("nickname"), Some(attached));
		assert_eq!(form.value(), json!({"email": "a@b.c", "nickname": "jo"}));
	}

	#[rstest]
	fn test_named_field_reuses_existing_child() {
		let form = group();
		let field = FieldDecl::new(ControlKind::Leaf).name("email").state(json!("ignored"));

		let attached = attach_control(&field, Some(form.control())).unwrap();

		assert_eq!(attached.value(), json!("a@b.c"));
		assert_eq!(form.len(), 1);
	}

	#[rstest]
	fn test_named_field_without_group_parent() {
		let field = FieldDecl::new(ControlKind::Leaf).name("x");
		let array = FormArray::new(Vec::<Control>::new(), ControlOptions::default());

		assert!(attach_control(&field, None).is_none());
		assert!(attach_control(&field, Some(array.control())).is_none());
	}

	#[rstest]
	#[case(None, json!([1, 2, 9]))]
	#[case(Some(0), json!([9, 1, 2]))]
	#[case(Some(10), json!([1, 2, 9]))]
	fn test_array_parent_inserts_at_index(#[case] index: Option<usize>, #[case] expected: serde_json::Value) {
		// Arrange
		let array = FormArray::new(
			[json!(1), json!(2)].map(|v| Control::from(FormControl::new(v, ControlOptions::default()))),
			ControlOptions::default(),
		);
		let mut field = FieldDecl::new(ControlKind::Leaf).state(json!(9));
		field.index = index;

		// Act
		let attached = attach_control(&field, Some(array.control())).unwrap();

		// Assert
		assert_eq!(array.value(), expected);
		assert_eq!(attached.value(), json!(9));
	}

	#[rstest]
	#[case(ControlKind::Group, true)]
	#[case(ControlKind::Array, true)]
	#[case(ControlKind::Leaf, false)]
	fn test_standalone_containers(#[case] kind: ControlKind, #[case] created: bool) {
		let attached = attach_control(&FieldDecl::new(kind), None);

		assert_eq!(attached.is_some(), created);
	}
}
