//! Properties of forms built from declarative schemas

use proptest::prelude::*;
use reactive_forms::builder::FormSchema;
use reactive_forms::prelude::*;
use serde_json::{Map, Value, json};

fn leaf_schema() -> impl Strategy<Value = (Value, bool, Option<usize>)> {
	(
		prop_oneof![
			Just(Value::Null),
			any::<i32>().prop_map(Value::from),
			"[a-z]{0,6}".prop_map(Value::from),
		],
		any::<bool>(),
		proptest::option::of(0usize..4),
	)
}

fn describe(fields: &[(Value, bool, Option<usize>)]) -> Value {
	let controls: Map<String, Value> = fields
		.iter()
		.enumerate()
		.map(|(index, (value, disabled, min_length))| {
			let validators = match min_length {
				Some(min_length) => json!([{"type": "min_length", "min_length": min_length}]),
				None => json!([]),
			};
			(
				format!("f{index}"),
				json!({"value": value, "disabled": disabled, "options": {"validators": validators}}),
			)
		})
		.collect();
	json!({ "controls": controls })
}

proptest! {
	#[test]
	fn built_value_matches_enabled_fields(fields in proptest::collection::vec(leaf_schema(), 1..6)) {
		let form = FormSchema::from_value(describe(&fields)).unwrap().build().unwrap();

		let enabled: Map<String, Value> = fields
			.iter()
			.enumerate()
			.filter(|(_, (_, disabled, _))| !disabled)
			.map(|(index, (value, _, _))| (format!("f{index}"), value.clone()))
			.collect();
		let raw: Map<String, Value> = fields
			.iter()
			.enumerate()
			.map(|(index, (value, _, _))| (format!("f{index}"), value.clone()))
			.collect();

		prop_assert_eq!(form.get_raw_value(), Value::Object(raw.clone()));
		if fields.iter().all(|(_, disabled, _)| *disabled) {
			prop_assert_eq!(form.status(), ControlStatus::Disabled);
			prop_assert_eq!(form.value(), Value::Object(raw));
		} else {
			prop_assert_eq!(form.value(), Value::Object(enabled));
		}
	}

	#[test]
	fn group_is_invalid_iff_an_enabled_child_is(fields in proptest::collection::vec(leaf_schema(), 1..6)) {
		let form = FormSchema::from_value(describe(&fields)).unwrap().build().unwrap();
		prop_assume!(!form.disabled());

		let any_invalid = (0..fields.len())
			.filter_map(|index| form.get(format!("f{index}").as_str()))
			.any(|child| child.invalid());

		prop_assert_eq!(form.invalid(), any_invalid);
	}

	#[test]
	fn revalidation_after_reset_is_stable(fields in proptest::collection::vec(leaf_schema(), 1..6)) {
		let form = FormSchema::from_value(describe(&fields)).unwrap().build().unwrap();
		let before = (form.value(), form.status(), form.errors());

		form.reset(None, UpdateOptions::default());
		form.update_value_and_validity(UpdateOptions::default());

		prop_assert_eq!((form.value(), form.status(), form.errors()), before);
		prop_assert!(form.pristine());
	}
}
