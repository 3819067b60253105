//! End-to-end form scenarios across the core, builder and binding crates

use reactive_forms::binding::{FieldBinding, FieldDecl, HostPlatform, InputKind, attach_control, input_props};
use reactive_forms::builder::{ControlConfig, FormBuilder};
use reactive_forms::core::validators::{self, compose, max_length, min, min_length, required};
use reactive_forms::prelude::*;
use reactive_forms_integration_tests::init_tracing;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::cell::Cell;
use std::rc::Rc;

fn leaf(value: Value) -> Control {
	FormControl::new(value, ControlOptions::default()).into()
}

#[fixture]
fn profile() -> FormGroup {
	init_tracing();
	FormGroup::new(
		[
			("name", FormControl::new(json!(""), ControlOptions::new().validator(required()))),
			("age", FormControl::new(json!(5), ControlOptions::new().validator(min(18.0)))),
		],
		ControlOptions::default(),
	)
}

#[rstest]
fn test_group_validity_follows_children(profile: FormGroup) {
	// Assert initial state
	assert_eq!(profile.status(), ControlStatus::Invalid);
	assert_eq!(profile.errors(), None);
	assert!(profile.get("name").unwrap().has_error("required"));
	assert!(profile.get("age").unwrap().has_error("min"));

	// Act
	profile
		.set_value(json!({"name": "Jon", "age": 20}), UpdateOptions::default())
		.unwrap();

	// Assert
	assert_eq!(profile.status(), ControlStatus::Valid);
	assert_eq!(profile.value(), json!({"name": "Jon", "age": 20}));
}

#[rstest]
fn test_strict_set_value_rejects_partial_input(profile: FormGroup) {
	let result = profile.set_value(json!({"name": "Jon"}), UpdateOptions::default());

	assert!(matches!(result, Err(FormError::MissingValue { ref name }) if name == "age"));
	assert_eq!(profile.get("name").unwrap().value(), json!(""));
}

#[rstest]
fn test_blur_field_through_rendered_props() {
	// Arrange
	let control = FormControl::new(json!(""), ControlOptions::new().update_on(UpdateOn::Blur));

	// Act
	control.on_change(json!("abc"));

	// Assert
	assert_eq!(control.value(), json!(""));
	let props = input_props(&control, &InputKind::Text, HostPlatform::Web);
	assert_eq!(props.value, json!("abc"));

	// Act
	props.on_blur();

	// Assert
	assert_eq!(control.value(), json!("abc"));
	assert!(control.touched());
	assert!(control.dirty());
}

#[rstest]
fn test_array_removal_reindexes() {
	// Arrange
	let array = FormArray::new([leaf(json!(1)), leaf(json!(2)), leaf(json!(3))], ControlOptions::default());

	// Act
	let removed = array.remove_at(1);

	// Assert
	assert_eq!(removed.map(|control| control.value()), Some(json!(2)));
	assert_eq!(array.value(), json!([1, 3]));
	assert_eq!(array.at(1).unwrap().value(), json!(3));
	assert_eq!(array.get(1_usize).unwrap().value(), json!(3));
}

#[rstest]
fn test_disabled_child_leaves_aggregate() {
	// Arrange
	let group = FormGroup::new([("a", leaf(json!(1))), ("b", leaf(json!(2)))], ControlOptions::default());

	// Act
	group.get("b").unwrap().disable(UpdateOptions::default());

	// Assert
	assert_eq!(group.value(), json!({"a": 1}));
	assert_eq!(group.get_raw_value(), json!({"a": 1, "b": 2}));
	assert!(!group.contains("b"));
}

#[rstest]
fn test_disable_wins_over_errors(profile: FormGroup) {
	// Act
	profile.disable(UpdateOptions::default());

	// Assert
	assert_eq!(profile.status(), ControlStatus::Disabled);
	assert_eq!(profile.get("name").unwrap().status(), ControlStatus::Disabled);
	assert_eq!(profile.get("name").unwrap().errors(), None);

	// Act
	profile.enable(UpdateOptions::default());

	// Assert
	assert_eq!(profile.status(), ControlStatus::Invalid);
	assert!(profile.get("name").unwrap().has_error("required"));
}

#[rstest]
fn test_pristine_propagates_both_ways(profile: FormGroup) {
	// Act
	profile.get("name").unwrap().mark_as_dirty(UpdateOptions::default());

	// Assert
	assert!(profile.dirty());

	// Act
	profile.mark_as_pristine(UpdateOptions::default());

	// Assert
	assert!(profile.pristine());
	assert!(profile.get("name").unwrap().pristine());
}

#[rstest]
#[case(FormState::from(json!("v")), json!("v"))]
#[case(FormState::default(), Value::Null)]
fn test_reset_restores_constructed_state(#[case] state: FormState, #[case] expected: Value) {
	// Arrange
	let control = FormControl::new(state, ControlOptions::default());
	control.on_focus();
	control.on_change(json!("v2"));
	control.on_blur();
	assert!(control.dirty() && control.touched());

	// Act
	control.reset(None, UpdateOptions::default());

	// Assert
	assert_eq!(control.value(), expected);
	assert!(control.pristine());
	assert!(control.untouched());
}

#[rstest]
fn test_composed_validators_merge_without_masking() {
	let validator = compose([required(), min_length(3)]).unwrap();
	let empty = leaf(json!(""));
	let short = leaf(json!("ab"));

	assert_eq!(validator.validate(&empty), Some(validators::error("required", true)));
	assert!(validator.validate(&short).unwrap().contains_key("minLength"));
}

#[rstest]
fn test_builder_form_with_bound_fields() {
	// Arrange
	let form = FormBuilder::group(
		[
			("email", ControlConfig::field(json!(""), [required(), validators::email()])),
			("tags", ControlConfig::Array(vec![json!("rust").into()])),
		],
		ControlOptions::default(),
	);
	let renders = Rc::new(Cell::new(0));
	let counter = Rc::clone(&renders);
	let mut binding = FieldBinding::new(move |_| counter.set(counter.get() + 1));
	binding.mount(form.clone());

	// Act
	let email = form.get("email").and_then(|control| control.to_form_control()).unwrap();
	input_props(&email, &InputKind::Text, HostPlatform::Web).on_change(json!("ann@example.com"));
	let tags = form.get("tags").unwrap();
	let tag = attach_control(&FieldDecl::new(ControlKind::Leaf).state(json!("forms")), Some(&tags)).unwrap();

	// Assert
	assert!(form.valid());
	assert_eq!(tag.parent(), Some(tags));
	assert_eq!(form.value(), json!({"email": "ann@example.com", "tags": ["rust", "forms"]}));
	assert!(renders.get() >= 2);
}

#[rstest]
fn test_collection_change_reaches_views_of_parent() {
	// Arrange
	let inner = FormArray::new(Vec::<Control>::new(), ControlOptions::new().validator(max_length(1)));
	let outer = FormGroup::new([("items", inner.clone())], ControlOptions::default());
	let notified = Rc::new(Cell::new(0));
	let counter = Rc::clone(&notified);
	outer.register_on_collection_change(move || counter.set(counter.get() + 1));
	let outer_states = Rc::new(Cell::new(0));
	let states = Rc::clone(&outer_states);
	outer.state_changes().subscribe(move |_| states.set(states.get() + 1));

	// Act
	inner.push(leaf(json!("a")));
	inner.push(leaf(json!("b")));
	outer.add_control("extra", leaf(json!(null)));

	// Assert
	assert_eq!(notified.get(), 1);
	assert!(outer_states.get() >= 2);
	assert!(inner.has_error("maxLength"));
	assert!(outer.invalid());
}

#[rstest]
fn test_submit_flushes_deferred_fields() {
	// Arrange
	let form = FormBuilder::group(
		[
			(
				"code",
				ControlConfig::field(json!(""), [min_length(4)]).with_update_on(UpdateOn::Submit),
			),
			("note", ControlConfig::from(json!(""))),
		],
		ControlOptions::default(),
	);
	let code = form.get("code").and_then(|control| control.to_form_control()).unwrap();
	code.on_change(json!("ab"));
	code.on_blur();
	assert_eq!(code.value(), json!(""));
	assert!(code.untouched());

	// Act
	form.handle_submit(UpdateOptions::default());

	// Assert
	assert!(form.submitted());
	assert_eq!(code.value(), json!("ab"));
	assert!(code.touched());
	assert!(code.dirty());
	assert!(form.has_error_at("minLength", "code"));
	assert!(form.invalid());
}
