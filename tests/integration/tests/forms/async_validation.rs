//! Async validation scheduled on a local executor

use futures::executor::LocalPool;
use reactive_forms::core::validators::{self, ASYNC_VALIDATOR_FAILED, AsyncValidatorError};
use reactive_forms::core::runtime;
use reactive_forms::prelude::*;
use reactive_forms_integration_tests::{ScriptedValidator, init_tracing};
use rstest::{fixture, rstest};
use serde_json::json;
use std::rc::Rc;

#[fixture]
fn pool() -> LocalPool {
	init_tracing();
	LocalPool::new()
}

fn username(script: &ScriptedValidator, pool: &LocalPool) -> FormControl {
	FormControl::new(
		json!(""),
		ControlOptions::new()
			.validator(validators::required())
			.async_validator(script.validator())
			.spawner(Rc::new(pool.spawner())),
	)
}

#[rstest]
fn test_pending_until_validation_settles(mut pool: LocalPool) {
	// Arrange
	let script = ScriptedValidator::new();
	let control = username(&script, &pool);
	assert!(control.invalid());
	assert_eq!(script.calls(), 0);

	// Act
	control.set_value(json!("jon"), UpdateOptions::default()).unwrap();

	// Assert
	assert_eq!(control.status(), ControlStatus::Pending);
	script.resolve(Ok(Some(validators::error("taken", true))));
	pool.run_until_stalled();
	assert_eq!(control.status(), ControlStatus::Invalid);
	assert!(control.has_error("taken"));
}

#[rstest]
fn test_late_result_of_superseded_validation_is_ignored(mut pool: LocalPool) {
	// Arrange
	let script = ScriptedValidator::new();
	let control = username(&script, &pool);
	control.set_value(json!("jon"), UpdateOptions::default()).unwrap();

	// Act
	control.set_value(json!("jonathan"), UpdateOptions::default()).unwrap();
	script.resolve(Ok(Some(validators::error("taken", true))));
	pool.run_until_stalled();

	// Assert
	assert_eq!(script.calls(), 2);
	assert!(control.pending());
	assert!(!control.has_error("taken"));

	script.resolve(Ok(None));
	pool.run_until_stalled();
	assert!(control.valid());
	assert_eq!(control.errors(), None);
}

#[rstest]
fn test_pending_child_makes_group_pending(mut pool: LocalPool) {
	// Arrange
	let script = ScriptedValidator::new();
	let form = FormGroup::new(
		[
			("user", username(&script, &pool)),
			("city", FormControl::new(json!("Oslo"), ControlOptions::default())),
		],
		ControlOptions::default(),
	);
	let statuses = Rc::new(std::cell::RefCell::new(Vec::new()));
	let sink = Rc::clone(&statuses);
	form.status_changes().subscribe(move |status| sink.borrow_mut().push(*status));

	// Act
	form.patch_value(json!({"user": "ann"}), UpdateOptions::default());
	script.resolve(Ok(None));
	pool.run_until_stalled();

	// Assert
	assert_eq!(*statuses.borrow(), vec![ControlStatus::Pending, ControlStatus::Valid]);
	assert!(form.valid());
}

#[rstest]
fn test_failing_validator_becomes_error(mut pool: LocalPool) {
	let script = ScriptedValidator::new();
	let control = username(&script, &pool);
	control.set_value(json!("ann"), UpdateOptions::default()).unwrap();

	script.resolve(Err(AsyncValidatorError::new("service unavailable")));
	pool.run_until_stalled();

	assert!(control.invalid());
	assert_eq!(control.get_error(ASYNC_VALIDATOR_FAILED), Some(json!("service unavailable")));
}

#[rstest]
fn test_group_validator_uses_thread_default_executor(mut pool: LocalPool) {
	// Arrange
	let previous = runtime::set_default_spawner(Rc::new(pool.spawner()));
	let script = ScriptedValidator::new();
	let form = FormGroup::new(
		[("code", FormControl::new(json!("x"), ControlOptions::default()))],
		ControlOptions::new().async_validator(script.validator()),
	);
	assert!(form.pending());

	// Act
	script.resolve(Ok(Some(validators::error("unknownCode", json!("x")))));
	pool.run_until_stalled();

	// Assert
	assert!(form.has_error("unknownCode"));
	assert!(form.get("code").unwrap().valid());
	match previous {
		Some(spawner) => {
			runtime::set_default_spawner(spawner);
		}
		None => {
			runtime::clear_default_spawner();
		}
	}
}
